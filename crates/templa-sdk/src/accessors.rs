//! Template functions exposing annotation data inside a render.
//!
//! Every render binds the same capability set twice: once over the requesting
//! annotation and once over the matched source annotation. [`AccessorNames`]
//! fixes which capabilities exist; [`REQUESTING`] and [`TARGET`] give each role
//! its own identifiers, so both roles always expose the same shape.
//!
//! Lookups take named arguments, as Tera functions require:
//!
//! ```text
//! {{ sel(key="name") }}            {{ targetSel(key="gen") }}
//! {{ attrs(key="limit") }}         {{ targetAttrs(key="limit") }}
//! {% set ptr = hasArg(name="ptr") %}
//! {% for a in annotationArguments() %}
//! ```

use std::collections::HashMap;
use std::sync::Arc;

use tera::{Tera, Value};

use crate::annotation::Annotation;

/// Identifiers one annotation role registers its accessors under.
#[derive(Debug, Clone, Copy)]
pub struct AccessorNames {
    /// Parameter lookup by `key`; empty string when absent.
    pub param: &'static [&'static str],
    /// Attribute lookup by `key`; null when absent.
    pub attr: &'static str,
    /// Whether positional argument `name` was given.
    pub has_arg: &'static str,
    pub defer: &'static str,
    pub template: &'static str,
    pub params: &'static str,
    pub attrs: &'static str,
    pub arguments: &'static str,
}

/// Accessors over the annotation that triggered generation.
pub const REQUESTING: AccessorNames = AccessorNames {
    param: &["sel", "params"],
    attr: "attrs",
    has_arg: "hasArg",
    defer: "annotationDefer",
    template: "annotationTemplate",
    params: "annotationParams",
    attrs: "annotationAttrs",
    arguments: "annotationArguments",
};

/// Accessors over the matched source annotation.
pub const TARGET: AccessorNames = AccessorNames {
    param: &["targetSel", "targetParams"],
    attr: "targetAttrs",
    has_arg: "targetHasArg",
    defer: "targetDefer",
    template: "targetTemplate",
    params: "targetAnnotationParams",
    attrs: "targetAnnotationAttrs",
    arguments: "targetArguments",
};

type Args = HashMap<String, Value>;

/// Register the accessors described by `names` over `annotation`.
pub(crate) fn register(tera: &mut Tera, names: &AccessorNames, annotation: &Arc<Annotation>) {
    for &name in names.param {
        let an = Arc::clone(annotation);
        tera.register_function(name, move |args: &Args| -> tera::Result<Value> {
            let key = string_arg(args, name, "key")?;
            Ok(Value::String(an.param(key).to_string()))
        });
    }

    let an = Arc::clone(annotation);
    let attr = names.attr;
    tera.register_function(attr, move |args: &Args| -> tera::Result<Value> {
        let key = string_arg(args, attr, "key")?;
        Ok(an.attr(key).cloned().unwrap_or(Value::Null))
    });

    let an = Arc::clone(annotation);
    let has_arg = names.has_arg;
    tera.register_function(has_arg, move |args: &Args| -> tera::Result<Value> {
        let arg = string_arg(args, has_arg, "name")?;
        Ok(Value::Bool(an.has_arg(arg)))
    });

    let an = Arc::clone(annotation);
    tera.register_function(names.defer, move |_: &Args| -> tera::Result<Value> {
        Ok(Value::Bool(an.defer))
    });

    let an = Arc::clone(annotation);
    tera.register_function(names.template, move |_: &Args| -> tera::Result<Value> {
        Ok(Value::String(an.template.clone()))
    });

    let an = Arc::clone(annotation);
    tera.register_function(names.params, move |_: &Args| -> tera::Result<Value> {
        Ok(Value::Object(
            an.params
                .iter()
                .map(|(k, v)| (k.clone(), Value::String(v.clone())))
                .collect(),
        ))
    });

    let an = Arc::clone(annotation);
    tera.register_function(names.attrs, move |_: &Args| -> tera::Result<Value> {
        Ok(Value::Object(
            an.attrs.iter().map(|(k, v)| (k.clone(), v.clone())).collect(),
        ))
    });

    let an = Arc::clone(annotation);
    tera.register_function(names.arguments, move |_: &Args| -> tera::Result<Value> {
        Ok(Value::Array(
            an.arguments.iter().cloned().map(Value::String).collect(),
        ))
    });
}

fn string_arg<'a>(
    args: &'a Args,
    function: &str,
    arg: &str,
) -> tera::Result<&'a str> {
    args.get(arg).and_then(Value::as_str).ok_or_else(|| {
        tera::Error::msg(format!("`{function}` expects a string `{arg}` argument"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tera::Context;

    fn render(template: &str) -> tera::Result<String> {
        let requesting = Annotation::new("makeFor")
            .with_param("x", "42")
            .with_attr("limit", 3)
            .with_argument("pointer")
            .with_template("inline body")
            .deferred();
        let target = Annotation::new("source")
            .with_param("x", "target-x")
            .with_param("gen", "go")
            .with_argument("mutable");

        let mut tera = Tera::default();
        register(&mut tera, &REQUESTING, &Arc::new(requesting));
        register(&mut tera, &TARGET, &Arc::new(target));
        tera.render_str(template, &Context::new())
    }

    #[test]
    fn test_param_lookup_per_role() {
        assert_eq!(render(r#"{{ sel(key="x") }}"#).unwrap(), "42");
        assert_eq!(render(r#"{{ params(key="x") }}"#).unwrap(), "42");
        assert_eq!(render(r#"{{ targetSel(key="x") }}"#).unwrap(), "target-x");
        assert_eq!(render(r#"{{ targetParams(key="gen") }}"#).unwrap(), "go");
        assert_eq!(render(r#"[{{ sel(key="missing") }}]"#).unwrap(), "[]");
    }

    #[test]
    fn test_attr_and_argument_predicates() {
        assert_eq!(render(r#"{{ attrs(key="limit") }}"#).unwrap(), "3");
        assert_eq!(
            render(r#"{% set p = hasArg(name="pointer") %}{% if p %}yes{% else %}no{% endif %}"#)
                .unwrap(),
            "yes"
        );
        assert_eq!(render(r#"{{ targetHasArg(name="pointer") }}"#).unwrap(), "false");
    }

    #[test]
    fn test_whole_annotation_accessors() {
        assert_eq!(render("{{ annotationDefer() }}").unwrap(), "true");
        assert_eq!(render("{{ targetDefer() }}").unwrap(), "false");
        assert_eq!(render("{{ annotationTemplate() }}").unwrap(), "inline body");
        assert_eq!(render("[{{ targetTemplate() }}]").unwrap(), "[]");
        assert_eq!(
            render("{% for a in annotationArguments() %}{{ a }}{% endfor %}").unwrap(),
            "pointer"
        );
        assert_eq!(
            render("{% for a in targetArguments() %}{{ a }}{% endfor %}").unwrap(),
            "mutable"
        );
        assert_eq!(
            render("{% set p = annotationParams() %}{{ p.x }}").unwrap(),
            "42"
        );
        assert_eq!(
            render("{% set p = targetAnnotationParams() %}{{ p.gen }}").unwrap(),
            "go"
        );
        assert_eq!(
            render("{% set a = annotationAttrs() %}{{ a.limit }}").unwrap(),
            "3"
        );
        assert_eq!(
            render("{% set a = targetAnnotationAttrs() %}{{ a | length }}").unwrap(),
            "0"
        );
    }

    #[test]
    fn test_missing_key_argument_is_an_error() {
        assert!(render("{{ sel() }}").is_err());
        assert!(render("{{ targetHasArg(key=1) }}").is_err());
    }
}
