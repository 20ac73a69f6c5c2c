//! Case-conversion filters available to every source template
//! (`{{ struct_declaration.name | snake_case }}`).

use std::collections::HashMap;

use heck::{ToKebabCase, ToLowerCamelCase, ToPascalCase, ToSnakeCase};
use tera::{Result, Tera, Value};

pub(crate) fn register(tera: &mut Tera) {
    tera.register_filter("snake_case", snake_case);
    tera.register_filter("pascal_case", pascal_case);
    tera.register_filter("camel_case", camel_case);
    tera.register_filter("kebab_case", kebab_case);
}

fn convert(value: &Value, filter: &str, case: fn(&str) -> String) -> Result<Value> {
    let s = value
        .as_str()
        .ok_or_else(|| tera::Error::msg(format!("{filter} filter expects a string")))?;
    Ok(Value::String(case(s)))
}

fn snake_case(value: &Value, _args: &HashMap<String, Value>) -> Result<Value> {
    convert(value, "snake_case", |s| s.to_snake_case())
}

fn pascal_case(value: &Value, _args: &HashMap<String, Value>) -> Result<Value> {
    convert(value, "pascal_case", |s| s.to_pascal_case())
}

fn camel_case(value: &Value, _args: &HashMap<String, Value>) -> Result<Value> {
    convert(value, "camel_case", |s| s.to_lower_camel_case())
}

fn kebab_case(value: &Value, _args: &HashMap<String, Value>) -> Result<Value> {
    convert(value, "kebab_case", |s| s.to_kebab_case())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tera::Context;

    fn render(template: &str, name: &str) -> String {
        let mut tera = Tera::default();
        register(&mut tera);
        let mut context = Context::new();
        context.insert("name", name);
        tera.render_str(template, &context).unwrap()
    }

    #[test]
    fn test_case_filters() {
        assert_eq!(render("{{ name | snake_case }}", "ShapeBuilder"), "shape_builder");
        assert_eq!(render("{{ name | pascal_case }}", "shape_builder"), "ShapeBuilder");
        assert_eq!(render("{{ name | camel_case }}", "ShapeBuilder"), "shapeBuilder");
        assert_eq!(render("{{ name | kebab_case }}", "ShapeBuilder"), "shape-builder");
    }

    #[test]
    fn test_filter_rejects_non_string() {
        let val = Value::Number(42.into());
        assert!(snake_case(&val, &HashMap::new()).is_err());
    }
}
