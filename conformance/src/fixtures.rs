//! Built-in declarations exercising every arity and marker combination.

use kindgen_model::{Declaration, WellKnownNames};

/// Arities 0 through 4 with the higher-kind marker, instance-only
/// declarations on both sides of the kind cap, one declaration with both
/// markers and one with none.
pub fn standard(names: &WellKnownNames) -> Vec<Declaration> {
    let hk = |name: &str, params: &[&str]| {
        Declaration::new(format!("com.example.{name}"), params).with_annotation(&names.higher_kind)
    };
    let instance = |name: &str, params: &[&str]| {
        Declaration::new(format!("com.example.{name}"), params).with_annotation(&names.instance)
    };

    vec![
        hk("Unit", &[]),
        hk("Example", &["A"]),
        hk("Pair", &["A", "B"]),
        hk("Triple", &["A", "B", "C"]),
        hk("Quad", &["A", "B", "C", "D"]),
        hk("Box", &["T"]).with_annotation(&names.instance),
        instance("Empty", &[]),
        instance("Const", &["K", "V"]),
        instance("Tuple5", &["A", "B", "C", "D", "E"]),
        Declaration::new("com.example.Plain", ["A"]),
    ]
}
