//! Template resolution by directory layout.
//!
//! A template name is a `/`-separated path below the template root, without
//! extension. Every proper prefix of the name is a potential *layout*: the
//! directory's own template, stored next to the directory it belongs to.
//!
//! ```text
//! views/
//! ├── dir2.html              layout for everything under dir2/
//! └── dir2/
//!     ├── dir21.html         layout for everything under dir2/dir21/
//!     └── dir21/
//!         └── dir211.html    leaf
//! ```
//!
//! `dir2/dir21/dir211` composes `dir2`, `dir2/dir21` and the leaf, in that
//! order. Missing layouts are skipped; a missing leaf is [`Error::NotFound`].
//! Fragments are concatenated rather than merged through block overrides, so
//! every fragment's output appears and macros defined by a layout are visible
//! to the fragments after it.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::Options;
use super::error::Error;

/// Fragment names composing `name`, outermost layout first, leaf last.
pub fn chain(name: &str) -> Result<Vec<&str>, Error> {
    let valid = !name.is_empty()
        && name.split('/').all(|seg| !seg.is_empty() && seg != "." && seg != ".." && !seg.contains('\\'));
    if !valid {
        return Err(Error::InvalidName(name.to_owned()));
    }

    let mut fragments: Vec<&str> = name.match_indices('/').map(|(i, _)| &name[..i]).collect();
    fragments.push(name);
    Ok(fragments)
}

/// Reads and concatenates every fragment of `name`.
pub(crate) fn compose(options: &Options, name: &str) -> Result<String, Error> {
    let fragments = chain(name)?;
    let Some((leaf, layouts)) = fragments.split_last() else {
        return Err(Error::InvalidName(name.to_owned()));
    };

    let mut sources = Vec::with_capacity(fragments.len());
    for layout in layouts {
        match read(options, layout)? {
            Some(source) => sources.push(source),
            None => debug!(template = name, layout, "no layout, skipping"),
        }
    }
    sources.push(read(options, leaf)?.ok_or_else(|| Error::NotFound(name.to_owned()))?);

    debug!(template = name, fragments = sources.len(), bin_fs = options.bin_fs(), "composed template");
    Ok(sources.join("\n"))
}

/// Reads one fragment. `Ok(None)` when it does not exist.
fn read(options: &Options, fragment: &str) -> Result<Option<String>, Error> {
    let file = format!("{fragment}{}", options.extension);

    let (path, bytes) = match &options.bin_fs {
        Some(assets) => {
            let key = asset_key(&options.directory, &file);
            match assets.open(&key) {
                Some(data) => (PathBuf::from(key), data.into_owned()),
                None => return Ok(None),
            }
        }
        None => {
            let path = options.directory.join(&file);
            match std::fs::read(&path) {
                Ok(data) => (path, data),
                Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
                Err(source) => return Err(Error::Io { path, source }),
            }
        }
    };

    String::from_utf8(bytes).map(Some).map_err(|_| Error::Utf8 { path })
}

/// Logical key of `file` inside an embedded bundle rooted at `directory`.
///
/// Keys are relative: `/virtual`, `./virtual` and `virtual/` all map to the
/// `virtual/` prefix.
pub(crate) fn asset_key(directory: &Path, file: &str) -> String {
    let dir = directory.to_string_lossy().replace('\\', "/");
    let dir = dir.trim_start_matches("./").trim_start_matches('/').trim_end_matches('/');
    if dir.is_empty() || dir == "." {
        file.to_owned()
    } else {
        format!("{dir}/{file}")
    }
}

#[cfg(test)]
mod tests {
    use std::borrow::Cow;
    use std::collections::HashMap;

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::view::{AssetSource, Assets};

    struct Bundle(HashMap<String, String>);

    impl AssetSource for Bundle {
        fn open(&self, path: &str) -> Option<Cow<'static, [u8]>> {
            self.0.get(path).map(|s| Cow::Owned(s.clone().into_bytes()))
        }
    }

    fn bundle(files: &[(&str, &str)]) -> Options {
        let map = files.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        Options::new("views").with_assets(Assets::new(Bundle(map)))
    }

    #[test]
    fn chain_lists_every_prefix() {
        assert_eq!(chain("index").unwrap(), vec!["index"]);
        assert_eq!(chain("dir1/dir11").unwrap(), vec!["dir1", "dir1/dir11"]);
        assert_eq!(
            chain("dir2/dir21/dir211").unwrap(),
            vec!["dir2", "dir2/dir21", "dir2/dir21/dir211"]
        );
    }

    #[test]
    fn chain_rejects_escaping_names() {
        for name in ["", "/abs", "dir/", "a//b", "../secret", "a/./b", "a\\b"] {
            assert!(matches!(chain(name), Err(Error::InvalidName(_))), "{name:?}");
        }
    }

    #[test]
    fn asset_key_normalizes_directory() {
        assert_eq!(asset_key(Path::new("views"), "a.html"), "views/a.html");
        assert_eq!(asset_key(Path::new("./views/"), "a.html"), "views/a.html");
        assert_eq!(asset_key(Path::new("/views"), "a.html"), "views/a.html");
        assert_eq!(asset_key(Path::new("/"), "a.html"), "a.html");
        assert_eq!(asset_key(Path::new("."), "a.html"), "a.html");
        assert_eq!(asset_key(Path::new(""), "a/b.html"), "a/b.html");
    }

    #[test]
    fn compose_skips_missing_layouts() {
        let options = bundle(&[
            ("views/a.html", "A"),
            ("views/a/b/c.html", "C"),
        ]);
        assert_eq!(compose(&options, "a/b/c").unwrap(), "A\nC");
    }

    #[test]
    fn compose_requires_the_leaf() {
        let options = bundle(&[("views/a.html", "A")]);
        assert!(matches!(compose(&options, "a/b"), Err(Error::NotFound(name)) if name == "a/b"));
    }

    #[test]
    fn compose_rejects_non_utf8() {
        struct Binary;
        impl AssetSource for Binary {
            fn open(&self, _path: &str) -> Option<Cow<'static, [u8]>> {
                Some(Cow::Borrowed(&[0xff, 0xfe]))
            }
        }
        let options = Options::new("views").with_assets(Assets::new(Binary));
        assert!(matches!(
            compose(&options, "page"),
            Err(Error::Utf8 { path }) if path == Path::new("views/page.html")
        ));
    }

    #[test]
    fn compose_reads_from_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("shop")).unwrap();
        std::fs::write(dir.path().join("shop.html"), "layout").unwrap();
        std::fs::write(dir.path().join("shop/cart.html"), "cart").unwrap();

        let options = Options::new(dir.path());
        assert_eq!(compose(&options, "shop/cart").unwrap(), "layout\ncart");
        assert!(matches!(compose(&options, "shop/none"), Err(Error::NotFound(_))));
    }
}
