//! Optional translation helper exposed to templates as `T`.

use std::fmt;
use std::sync::Arc;

use minijinja::value::{Object, Rest, Value, from_args};
use minijinja::State;

/// Translation capability looked up from request-scoped values.
///
/// Any `Fn(&str, &[String]) -> String` qualifies.
pub trait Translator: Send + Sync + 'static {
    fn translate(&self, key: &str, args: &[String]) -> String;
}

impl<F> Translator for F
where
    F: Fn(&str, &[String]) -> String + Send + Sync + 'static,
{
    fn translate(&self, key: &str, args: &[String]) -> String {
        self(key, args)
    }
}

/// Request-scoped translator. Insert it into the request before the handler
/// extracts its [`View`](super::View); templates then call `{{ T("key", "arg") }}`.
///
/// Without one, calling `T` fails the render.
#[derive(Clone)]
pub struct I18n(Arc<dyn Translator>);

impl I18n {
    pub fn new(translator: impl Translator) -> Self {
        Self(Arc::new(translator))
    }

    pub fn translate(&self, key: &str, args: &[String]) -> String {
        self.0.translate(key, args)
    }

    /// The callable template value bound to `T`.
    pub(crate) fn helper(&self) -> Value {
        Value::from_object(Helper(self.clone()))
    }
}

impl fmt::Debug for I18n {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("I18n(..)")
    }
}

#[derive(Debug)]
struct Helper(I18n);

impl Object for Helper {
    fn call(self: &Arc<Self>, _state: &State<'_, '_>, args: &[Value]) -> Result<Value, minijinja::Error> {
        let (key, rest): (&str, Rest<String>) = from_args(args)?;
        Ok(Value::from(self.0.translate(key, rest.as_slice())))
    }
}

#[cfg(test)]
mod tests {
    use minijinja::{Environment, context};

    use super::*;

    fn concat(key: &str, args: &[String]) -> String {
        std::iter::once(key).chain(args.iter().map(String::as_str)).collect()
    }

    #[test]
    fn closures_are_translators() {
        let i18n = I18n::new(concat);
        assert_eq!(i18n.translate("a", &["b".into(), "c".into()]), "abc");
    }

    #[test]
    fn helper_is_callable_from_templates() {
        let env = Environment::new();
        let out = env
            .render_str(r#"{{ T("hello", ", ", "world") }}|{{ T("bare") }}"#, context! { T => I18n::new(concat).helper() })
            .unwrap();
        assert_eq!(out, "hello, world|bare");
    }

    #[test]
    fn helper_requires_a_key() {
        let env = Environment::new();
        let err = env.render_str("{{ T() }}", context! { T => I18n::new(concat).helper() });
        assert!(err.is_err());
    }
}
