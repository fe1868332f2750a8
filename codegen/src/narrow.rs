//! Narrowing methods: the `narrowK` overload family.
//!
//! Every overload is `public static`, generic over fresh `A`, `B`, `C`, takes
//! one parameter `hkt` in some accepted shape and returns the declaration
//! instantiated with those fresh parameters. Overloads differ only in the
//! shape of `hkt`, so a call site written against any shape narrows back to
//! the same concrete type.

use kindgen_model::names::{HKT_PARAMETER, NARROW_K, NARROW_TYPE_PARAMETERS};
use kindgen_model::{
    Bindings, Declaration, MethodHeader, Modifier, Parameter, TypeExpr, VariableOwner,
};

use crate::error::SynthError;
use crate::registry::{TypeFactory, WrapperTypes};
use crate::wrapper::{self, Arity, WrapperShape};

/// Builds every narrowing overload for a declaration of the given arity.
///
/// An overload whose applier is not resolved is left out; the others are
/// still produced.
///
/// # Errors
///
/// Returns an error if the factory fails.
pub fn synthesize<F: TypeFactory + ?Sized>(
    factory: &F,
    types: &WrapperTypes,
    decl: &Declaration,
    arity: Arity,
) -> Result<Vec<MethodHeader>, SynthError> {
    let mut methods = Vec::new();
    for shape in arity.narrowing_shapes() {
        if let Some(method) = narrowing_method(factory, types, decl, shape)? {
            methods.push(method);
        }
    }
    Ok(methods)
}

/// Builds the overload accepting one shape; `None` if an applier is missing.
///
/// # Errors
///
/// Returns an error if the factory fails.
pub fn narrowing_method<F: TypeFactory + ?Sized>(
    factory: &F,
    types: &WrapperTypes,
    decl: &Declaration,
    shape: WrapperShape,
) -> Result<Option<MethodHeader>, SynthError> {
    let owner = VariableOwner::Method {
        declaration: decl.id.clone(),
        method: NARROW_K.to_owned(),
    };
    let type_parameters: Vec<_> = NARROW_TYPE_PARAMETERS[..shape.arity().get()]
        .iter()
        .enumerate()
        .map(|(i, name)| factory.fresh_type_parameter(owner.clone(), name, i))
        .collect();
    let args: Vec<TypeExpr> = type_parameters
        .iter()
        .cloned()
        .map(TypeExpr::Variable)
        .collect();

    let witness = factory.witness_type(decl);
    let Some(hkt) = wrapper::apply(factory, types, shape, witness, &args)? else {
        tracing::debug!(
            declaration = %decl.qualified_name,
            outer = shape.outer().get(),
            "applier not resolved; narrowK overload omitted"
        );
        return Ok(None);
    };
    let return_type = factory.declaration_type(decl, args)?;

    Ok(Some(MethodHeader {
        owner: decl.id.clone(),
        name: NARROW_K.to_owned(),
        modifiers: vec![Modifier::Public, Modifier::Static],
        type_parameters,
        parameter: Some(Parameter {
            name: HKT_PARAMETER.to_owned(),
            ty: hkt,
        }),
        return_type,
    }))
}

/// Applies a narrowing overload at the type level: infers its type
/// parameters from `actual` and returns the instantiated return type.
///
/// Returns `None` if the overload does not accept `actual`.
#[must_use]
pub fn narrowed_type(method: &MethodHeader, actual: &TypeExpr) -> Option<TypeExpr> {
    let parameter = method.parameter.as_ref()?;
    let owner = method
        .type_parameters
        .first()
        .map(|p| p.owner.clone())
        .unwrap_or_else(|| VariableOwner::Method {
            declaration: method.owner.clone(),
            method: method.name.clone(),
        });
    let mut bindings = Bindings::new();
    if !parameter.ty.bind(actual, &owner, &mut bindings) {
        return None;
    }
    Some(method.return_type.substitute(&bindings))
}

/// Structural overload resolution: the first `narrowK` accepting `actual`.
#[must_use]
pub fn select_overload<'a>(
    methods: impl IntoIterator<Item = &'a MethodHeader>,
    actual: &TypeExpr,
) -> Option<&'a MethodHeader> {
    methods
        .into_iter()
        .filter(|m| m.name == NARROW_K)
        .find(|m| narrowed_type(m, actual).is_some())
}
