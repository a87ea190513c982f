//! View configuration and embedded template bundles.

use std::borrow::Cow;
use std::fmt;
use std::marker::PhantomData;
use std::path::PathBuf;
use std::sync::Arc;

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use rust_embed::RustEmbed;
use serde::{Deserialize, Serialize};

/// Read-only source of embedded template bytes, keyed by logical path
/// (`<directory>/<name><extension>`, always `/`-separated).
pub trait AssetSource: Send + Sync + 'static {
    fn open(&self, path: &str) -> Option<Cow<'static, [u8]>>;
}

struct Embedded<E>(PhantomData<fn() -> E>);

impl<E: RustEmbed + 'static> AssetSource for Embedded<E> {
    fn open(&self, path: &str) -> Option<Cow<'static, [u8]>> {
        E::get(path).map(|file| file.data)
    }
}

/// Handle to an embedded template bundle.
#[derive(Clone)]
pub struct Assets(Arc<dyn AssetSource>);

impl Assets {
    /// Bundle generated by `#[derive(rust_embed::Embed)]`.
    pub fn embedded<E: RustEmbed + 'static>() -> Self {
        Self(Arc::new(Embedded::<E>(PhantomData)))
    }

    pub fn new(source: impl AssetSource) -> Self {
        Self(Arc::new(source))
    }

    pub(crate) fn open(&self, path: &str) -> Option<Cow<'static, [u8]>> {
        self.0.open(path)
    }
}

impl fmt::Debug for Assets {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Assets(..)")
    }
}

/// Where and how templates are found.
///
/// ```rust
/// use tsu_view::view::Options;
///
/// let options = Options::new("views").with_cache(true);
/// assert!(!options.bin_fs());
/// ```
#[derive(Clone, Debug)]
pub struct Options {
    /// Root of the template tree.
    pub directory: PathBuf,
    /// When set, templates are read from this bundle instead of the filesystem.
    pub bin_fs: Option<Assets>,
    /// Suffix appended to every template name, `.html` by default.
    pub extension: String,
    /// Keep compiled templates for the lifetime of the middleware.
    pub cache: bool,
}

impl Options {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self { directory: directory.into(), ..Self::default() }
    }

    /// Reads templates from the embedded bundle `E` instead of the filesystem.
    ///
    /// Lookups use `<directory>/<name><extension>` with any leading `./` or
    /// `/` removed, so `Options::new("/views")` matches a bundle declared with
    /// `#[prefix = "views/"]`.
    pub fn embedded<E: RustEmbed + 'static>(self) -> Self {
        self.with_assets(Assets::embedded::<E>())
    }

    pub fn with_assets(mut self, assets: Assets) -> Self {
        self.bin_fs = Some(assets);
        self
    }

    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    pub fn with_cache(mut self, cache: bool) -> Self {
        self.cache = cache;
        self
    }

    /// Whether templates come from an embedded bundle.
    pub fn bin_fs(&self) -> bool {
        self.bin_fs.is_some()
    }

    /// Extracts `directory`, `extension` and `cache` from `figment`, falling
    /// back to the defaults for anything it does not set.
    ///
    /// An embedded bundle is a compiled-in type and can only be attached in
    /// code ([`Options::embedded`]); `bin_fs = true` in configuration is an error.
    pub fn from_figment(figment: Figment) -> Result<Self, figment::Error> {
        let settings: Settings = Figment::from(Serialized::defaults(Settings::default()))
            .merge(figment)
            .extract()?;
        if settings.bin_fs == Some(true) {
            return Err(figment::Error::from(
                "bin_fs cannot be enabled from configuration; attach the bundle with Options::embedded"
                    .to_owned(),
            ));
        }
        Ok(Self {
            directory: settings.directory,
            bin_fs: None,
            extension: settings.extension,
            cache: settings.cache,
        })
    }

    /// Loads settings from `view.toml` (if present) and `TSU_VIEW_*`
    /// environment variables, the latter taking precedence. See
    /// [`Options::from_figment`] for the `bin_fs` rule.
    pub fn load() -> Result<Self, figment::Error> {
        Self::from_figment(
            Figment::new()
                .merge(Toml::file("view.toml"))
                .merge(Env::prefixed("TSU_VIEW_")),
        )
    }
}

impl Default for Options {
    fn default() -> Self {
        let settings = Settings::default();
        Self {
            directory: settings.directory,
            bin_fs: None,
            extension: settings.extension,
            cache: settings.cache,
        }
    }
}

/// The file/environment-configurable part of [`Options`].
#[derive(Debug, Deserialize, Serialize)]
struct Settings {
    directory: PathBuf,
    extension: String,
    cache: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    bin_fs: Option<bool>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("views"),
            extension: ".html".to_owned(),
            cache: false,
            bin_fs: None,
        }
    }
}
