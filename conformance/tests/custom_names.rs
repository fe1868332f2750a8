//! The laws hold under renamed well-known types, and a synthesizer missing an
//! applier degrades gracefully rather than failing.

use kindgen_codegen::{ClassPath, Synthesizer};
use kindgen_conformance::{fixtures, run_all, Severity};
use kindgen_model::{Config, WellKnownNames};

#[test]
fn renamed_library_conforms() {
    let config = Config::from_toml_str(
        r#"
        [names]
        higher_kind = "org.lib.HigherKind"
        instance = "org.lib.Instance"
        kind = "org.lib.Kind"
        higher1 = "org.lib.App1"
        higher2 = "org.lib.App2"
        higher3 = "org.lib.App3"
        "#,
    )
    .unwrap();
    let synth = Synthesizer::from_config(&config);
    let report = run_all(&fixtures::standard(synth.names()), &synth).unwrap();
    assert!(report.all_passed(), "{:#?}", report.results);
    assert_eq!(report.count(Severity::Warning), 0);
}

#[test]
fn missing_binary_applier_only_warns() {
    let names = WellKnownNames::default();
    let classpath = ClassPath::from_config(&Config::default()).without(&names.higher2);
    let synth = Synthesizer::new(classpath, names);

    let report = run_all(&fixtures::standard(synth.names()), &synth).unwrap();
    assert!(report.all_passed(), "{:#?}", report.results);
    assert_eq!(report.count(Severity::Warning), 1);
}
