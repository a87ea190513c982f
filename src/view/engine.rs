use std::sync::{PoisonError, RwLock};

use minijinja::{Environment, Value};
use tracing::debug;

use super::Options;
use super::error::Error;
use super::resolve::compose;

/// Compiles composed templates and renders them.
///
/// Without caching every render builds a fresh environment, so edits to the
/// template tree show up on the next request. With caching the first
/// composition of a name is kept for the lifetime of the engine.
pub(crate) struct Engine {
    options: Options,
    cache: Option<RwLock<Environment<'static>>>,
}

impl Engine {
    pub(crate) fn new(options: Options) -> Self {
        let cache = options.cache.then(|| RwLock::new(Environment::new()));
        Self { options, cache }
    }

    pub(crate) fn render(&self, name: &str, ctx: Value) -> Result<String, Error> {
        // The extension is part of the key so `.html` templates get autoescaped.
        let key = format!("{name}{}", self.options.extension);

        let Some(cache) = &self.cache else {
            let mut env = Environment::new();
            env.add_template_owned(key.clone(), compose(&self.options, name)?)?;
            return Ok(env.get_template(&key)?.render(ctx)?);
        };

        {
            let env = cache.read().unwrap_or_else(PoisonError::into_inner);
            if let Ok(template) = env.get_template(&key) {
                debug!(template = name, "template cache hit");
                return Ok(template.render(ctx)?);
            }
        }

        let source = compose(&self.options, name)?;
        let mut env = cache.write().unwrap_or_else(PoisonError::into_inner);
        env.add_template_owned(key.clone(), source)?;
        Ok(env.get_template(&key)?.render(ctx)?)
    }
}
