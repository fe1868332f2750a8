//! Arity dispatcher: which synthesizers run for a declaration and request.

use kindgen_model::{
    Config, Declaration, MethodHeader, Request, SyntheticMember, WellKnownNames, WitnessType,
};

use crate::error::SynthError;
use crate::registry::{ClassPath, TypeFactory, WrapperTypes};
use crate::wrapper::Arity;
use crate::{instance, kind, narrow, witness};

/// A recognised marker annotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Marker {
    /// Witness / kind / narrow synthesis.
    HigherKind,
    /// Instance-factory synthesis.
    Instance,
}

/// Synthesizes members from a declaration snapshot.
///
/// Holds its collaborators explicitly: a [`TypeFactory`], the well-known
/// names, and the [`WrapperTypes`] resolved from both at construction.
#[derive(Debug)]
pub struct Synthesizer<F> {
    factory: F,
    names: WellKnownNames,
    types: WrapperTypes,
}

impl Synthesizer<ClassPath> {
    /// Builds a synthesizer over the class path described by `config`.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self::new(ClassPath::from_config(config), config.names.clone())
    }
}

impl<F: TypeFactory> Synthesizer<F> {
    /// Creates a synthesizer, resolving the well-known types once.
    pub fn new(factory: F, names: WellKnownNames) -> Self {
        let types = WrapperTypes::resolve(&factory, &names);
        let missing = types.missing();
        if missing.is_empty() {
            tracing::debug!("all well-known types resolved");
        } else {
            tracing::warn!(
                ?missing,
                "well-known types not resolved; dependent members will be omitted"
            );
        }
        Self {
            factory,
            names,
            types,
        }
    }

    /// The host type factory.
    pub fn factory(&self) -> &F {
        &self.factory
    }

    /// The configured well-known names.
    pub fn names(&self) -> &WellKnownNames {
        &self.names
    }

    /// The resolved well-known types.
    pub fn types(&self) -> &WrapperTypes {
        &self.types
    }

    /// Marker annotations present on `decl`, in fixed order.
    #[must_use]
    pub fn markers(&self, decl: &Declaration) -> Vec<Marker> {
        let mut markers = Vec::with_capacity(2);
        if decl.has_annotation(&self.names.higher_kind) {
            markers.push(Marker::HigherKind);
        }
        if decl.has_annotation(&self.names.instance) {
            markers.push(Marker::Instance);
        }
        markers
    }

    /// Synthesizes the members of one request kind.
    ///
    /// # Errors
    ///
    /// Returns an error only if the type factory fails.
    pub fn synthesize(
        &self,
        decl: &Declaration,
        request: Request,
    ) -> Result<Vec<SyntheticMember>, SynthError> {
        let mut members = Vec::new();
        for marker in self.markers(decl) {
            tracing::info!(
                declaration = %decl.qualified_name,
                request = request.as_str(),
                ?marker,
                "process declaration"
            );
            match (request, marker) {
                (Request::Class, Marker::HigherKind) => members.extend(
                    self.synthesize_for_class(decl)?
                        .into_iter()
                        .map(SyntheticMember::Witness),
                ),
                (Request::Methods, Marker::HigherKind) => members.extend(
                    self.synthesize_for_methods(decl)?
                        .into_iter()
                        .map(SyntheticMember::Method),
                ),
                (Request::Methods, Marker::Instance) => {
                    members.push(SyntheticMember::Method(instance::synthesize(
                        &self.factory,
                        decl,
                    )?));
                }
                (Request::Class, Marker::Instance) => {}
            }
        }
        Ok(members)
    }

    /// The witness type, for a marked declaration of arity 1..=3.
    ///
    /// # Errors
    ///
    /// Returns an error only if the type factory fails.
    pub fn synthesize_for_class(&self, decl: &Declaration) -> Result<Vec<WitnessType>, SynthError> {
        if self.kind_arity(decl).is_none() {
            return Ok(Vec::new());
        }
        Ok(witness::synthesize(&self.factory, &self.types, decl)?
            .into_iter()
            .collect())
    }

    /// Narrowing overloads followed by lifting methods, for a marked
    /// declaration of arity 1..=3.
    ///
    /// # Errors
    ///
    /// Returns an error only if the type factory fails.
    pub fn synthesize_for_methods(
        &self,
        decl: &Declaration,
    ) -> Result<Vec<MethodHeader>, SynthError> {
        let Some(arity) = self.kind_arity(decl) else {
            return Ok(Vec::new());
        };
        let mut methods = narrow::synthesize(&self.factory, &self.types, decl, arity)?;
        methods.extend(kind::synthesize(&self.factory, &self.types, decl, arity)?);
        Ok(methods)
    }

    /// The instance factory, if `decl` carries the instance marker.
    ///
    /// # Errors
    ///
    /// Returns an error only if the type factory fails.
    pub fn synthesize_instance(
        &self,
        decl: &Declaration,
    ) -> Result<Option<MethodHeader>, SynthError> {
        if !decl.has_annotation(&self.names.instance) {
            return Ok(None);
        }
        instance::synthesize(&self.factory, decl).map(Some)
    }

    /// Arity of a declaration eligible for the kind family.
    fn kind_arity(&self, decl: &Declaration) -> Option<Arity> {
        if !decl.has_annotation(&self.names.higher_kind) {
            return None;
        }
        let arity = Arity::from_count(decl.arity());
        if arity.is_none() {
            tracing::debug!(
                declaration = %decl.qualified_name,
                arity = decl.arity(),
                "arity outside 1..=3; nothing to synthesize"
            );
        }
        arity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn synth() -> Synthesizer<ClassPath> {
        Synthesizer::from_config(&Config::default())
    }

    fn marked(name: &str, params: &[&str]) -> Declaration {
        Declaration::new(name, params).with_annotation(WellKnownNames::default().higher_kind)
    }

    fn method_names(members: &[SyntheticMember]) -> Vec<&str> {
        members.iter().map(SyntheticMember::name).collect()
    }

    #[test]
    fn unmarked_declaration_yields_nothing() {
        let s = synth();
        let decl = Declaration::new("com.example.Plain", ["A"]);
        for request in Request::ALL {
            assert!(s.synthesize(&decl, request).unwrap().is_empty());
        }
    }

    #[test]
    fn family_sizes_by_arity() {
        let s = synth();
        let cases: [(&[&str], usize, &[&str]); 5] = [
            (&[], 0, &[]),
            (&["A"], 1, &["narrowK", "kind1"]),
            (&["A", "B"], 1, &["narrowK", "narrowK", "kind2", "kind1"]),
            (
                &["A", "B", "C"],
                1,
                &["narrowK", "narrowK", "narrowK", "kind3", "kind1", "kind2"],
            ),
            (&["A", "B", "C", "D"], 0, &[]),
        ];
        for (params, witnesses, methods) in cases {
            let decl = marked("com.example.T", params);
            assert_eq!(s.synthesize(&decl, Request::Class).unwrap().len(), witnesses);
            assert_eq!(
                method_names(&s.synthesize(&decl, Request::Methods).unwrap()),
                methods.to_vec()
            );
        }
    }

    #[test]
    fn both_markers_contribute() {
        let s = synth();
        let decl = marked("com.example.Box", &["A"])
            .with_annotation(WellKnownNames::default().instance);
        let methods = s.synthesize(&decl, Request::Methods).unwrap();
        assert_eq!(method_names(&methods), vec!["narrowK", "kind1", "instance"]);
        assert_eq!(s.synthesize(&decl, Request::Class).unwrap().len(), 1);
    }

    #[test]
    fn instance_marker_ignores_the_arity_cap() {
        let s = synth();
        let decl = Declaration::new("com.example.Five", ["A", "B", "C", "D", "E"])
            .with_annotation(WellKnownNames::default().instance);
        assert!(s.synthesize(&decl, Request::Class).unwrap().is_empty());
        let methods = s.synthesize(&decl, Request::Methods).unwrap();
        assert_eq!(method_names(&methods), vec!["instance"]);
        assert!(s.synthesize_instance(&decl).unwrap().is_some());
    }

    #[test]
    fn custom_names_are_honoured() {
        let config = Config::from_toml_str(
            r#"
            [names]
            higher_kind = "org.example.Hk"
            "#,
        )
        .unwrap();
        let s = Synthesizer::from_config(&config);
        let decl = Declaration::new("org.example.Box", ["A"]).with_annotation("org.example.Hk");
        assert_eq!(s.synthesize(&decl, Request::Methods).unwrap().len(), 2);
        let default_marked = marked("org.example.Box", &["A"]);
        assert!(s.synthesize(&default_marked, Request::Methods).unwrap().is_empty());
    }
}
