//! Wrapper-type builder: N-ary application as nested unary application.
//!
//! A declaration `D<A, B, C>` is represented against its witness `µ` either
//! canonically, `Higher3<µ, A, B, C>`, or by applying the unary applier to a
//! prefix of the arguments and a smaller applier to the rest:
//!
//! | shape (arity, outer) | type |
//! |---|---|
//! | (1, 1) | `Higher1<µ, A>` |
//! | (2, 2) | `Higher2<µ, A, B>` |
//! | (2, 1) | `Higher1<Higher1<µ, A>, B>` |
//! | (3, 3) | `Higher3<µ, A, B, C>` |
//! | (3, 2) | `Higher2<Higher1<µ, A>, B, C>` |
//! | (3, 1) | `Higher1<Higher1<Higher1<µ, A>, B>, C>` |
//!
//! Both lifting and narrowing build their types here, so the two directions
//! agree by construction.

use kindgen_model::names::kind_method;
use kindgen_model::TypeExpr;

use crate::error::SynthError;
use crate::registry::{TypeFactory, WrapperTypes};

/// Number of type parameters of a declaration the kind family supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Arity {
    /// `D<A>`.
    One,
    /// `D<A, B>`.
    Two,
    /// `D<A, B, C>`.
    Three,
}

impl Arity {
    /// Every supported arity, ascending.
    pub const ALL: [Arity; 3] = [Arity::One, Arity::Two, Arity::Three];

    /// Classifies a type-parameter count; `None` outside 1..=3.
    #[must_use]
    pub fn from_count(n: usize) -> Option<Arity> {
        match n {
            1 => Some(Arity::One),
            2 => Some(Arity::Two),
            3 => Some(Arity::Three),
            _ => None,
        }
    }

    /// The count this arity stands for.
    #[must_use]
    pub fn get(self) -> usize {
        match self {
            Arity::One => 1,
            Arity::Two => 2,
            Arity::Three => 3,
        }
    }

    /// Shapes accepted by narrowing overloads: canonical first, then by
    /// decreasing outermost arity.
    #[must_use]
    pub fn narrowing_shapes(self) -> Vec<WrapperShape> {
        Arity::ALL
            .iter()
            .rev()
            .filter(|outer| **outer <= self)
            .map(|outer| WrapperShape { arity: self, outer: *outer })
            .collect()
    }

    /// Shapes produced by lifting methods: canonical first, then nested
    /// forms by increasing outermost arity.
    #[must_use]
    pub fn lifting_shapes(self) -> Vec<WrapperShape> {
        let mut shapes = vec![WrapperShape::canonical(self)];
        shapes.extend(
            Arity::ALL
                .iter()
                .filter(|outer| **outer < self)
                .map(|outer| WrapperShape { arity: self, outer: *outer }),
        );
        shapes
    }
}

/// How an `arity`-ary application is nested.
///
/// The first `arity - outer` arguments are applied one at a time with the
/// unary applier; the `outer`-ary applier then takes the remaining ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WrapperShape {
    arity: Arity,
    outer: Arity,
}

impl WrapperShape {
    /// Creates a shape; `None` if `outer` exceeds `arity`.
    #[must_use]
    pub fn new(arity: Arity, outer: Arity) -> Option<Self> {
        (outer <= arity).then_some(Self { arity, outer })
    }

    /// The single N-ary application.
    #[must_use]
    pub fn canonical(arity: Arity) -> Self {
        Self { arity, outer: arity }
    }

    /// Total number of applied arguments.
    #[must_use]
    pub fn arity(self) -> Arity {
        self.arity
    }

    /// Arity of the outermost applier.
    #[must_use]
    pub fn outer(self) -> Arity {
        self.outer
    }

    /// True for the single N-ary application.
    #[must_use]
    pub fn is_canonical(self) -> bool {
        self.arity == self.outer
    }

    /// Number of unary steps applied before the outermost applier.
    #[must_use]
    pub fn unary_steps(self) -> usize {
        self.arity.get() - self.outer.get()
    }

    /// Name of the lifting method returning this shape.
    #[must_use]
    pub fn lifting_name(self) -> String {
        kind_method(self.outer.get())
    }
}

/// Applies `witness` to `args` in the given shape.
///
/// Returns `Ok(None)` when an applier the shape needs is not resolved.
///
/// # Errors
///
/// Returns an error if `args` does not match the shape's arity or the
/// factory rejects an instantiation.
pub fn apply<F: TypeFactory + ?Sized>(
    factory: &F,
    types: &WrapperTypes,
    shape: WrapperShape,
    witness: TypeExpr,
    args: &[TypeExpr],
) -> Result<Option<TypeExpr>, SynthError> {
    if args.len() != shape.arity.get() {
        return Err(SynthError::ShapeArguments {
            expected: shape.arity.get(),
            actual: args.len(),
        });
    }
    let (prefix, rest) = args.split_at(shape.unary_steps());
    let mut base = witness;
    for arg in prefix {
        match apply_n(factory, types, base, std::slice::from_ref(arg))? {
            Some(applied) => base = applied,
            None => return Ok(None),
        }
    }
    apply_n(factory, types, base, rest)
}

/// One application of the `args.len()`-ary applier.
fn apply_n<F: TypeFactory + ?Sized>(
    factory: &F,
    types: &WrapperTypes,
    base: TypeExpr,
    args: &[TypeExpr],
) -> Result<Option<TypeExpr>, SynthError> {
    let Some(applier) = types.applier(args.len()) else {
        return Ok(None);
    };
    let mut all = Vec::with_capacity(args.len() + 1);
    all.push(base);
    all.extend_from_slice(args);
    Ok(Some(factory.instantiate(applier, all)?))
}

/// Recovers `(witness, arguments)` from any nesting of resolved appliers.
///
/// Returns `None` if `expr` is not an applier instantiation.
#[must_use]
pub fn unwrap(types: &WrapperTypes, expr: &TypeExpr) -> Option<(TypeExpr, Vec<TypeExpr>)> {
    let TypeExpr::Class { name, args } = expr else {
        return None;
    };
    let n = types.applier_arity(name)?;
    let (base, applied) = args.split_first()?;
    if applied.len() != n {
        return None;
    }
    match unwrap(types, base) {
        Some((witness, mut inner)) => {
            inner.extend_from_slice(applied);
            Some((witness, inner))
        }
        None => Some((base.clone(), applied.to_vec())),
    }
}

/// Classifies `expr` as one of the accepted shapes.
///
/// Only a chain of unary applications under a single outermost applier is
/// accepted; other nestings (e.g. a binary applier below a unary one) yield
/// `None` even though [`unwrap`] can flatten them.
#[must_use]
pub fn shape_of(types: &WrapperTypes, expr: &TypeExpr) -> Option<WrapperShape> {
    let TypeExpr::Class { name, args } = expr else {
        return None;
    };
    let outer = types.applier_arity(name)?;
    if args.len() != outer + 1 {
        return None;
    }
    let mut steps = 0;
    let mut base = &args[0];
    while let TypeExpr::Class { name, args } = base {
        match types.applier_arity(name) {
            Some(1) if args.len() == 2 => {
                steps += 1;
                base = &args[0];
            }
            Some(_) => return None,
            None => break,
        }
    }
    WrapperShape::new(Arity::from_count(outer + steps)?, Arity::from_count(outer)?)
}

/// True when both expressions apply the same witness to the same ordered
/// arguments, whatever their nesting.
#[must_use]
pub fn equivalent(types: &WrapperTypes, a: &TypeExpr, b: &TypeExpr) -> bool {
    match (unwrap(types, a), unwrap(types, b)) {
        (Some(x), Some(y)) => x == y,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::ClassPath;
    use kindgen_model::{Config, WellKnownNames};

    fn setup() -> (ClassPath, WrapperTypes) {
        let cp = ClassPath::from_config(&Config::default());
        let types = WrapperTypes::resolve(&cp, &WellKnownNames::default());
        (cp, types)
    }

    fn args(n: usize) -> Vec<TypeExpr> {
        ["p.A", "p.B", "p.C"][..n]
            .iter()
            .map(|s| TypeExpr::class(*s))
            .collect()
    }

    fn shape(arity: usize, outer: usize) -> WrapperShape {
        WrapperShape::new(
            Arity::from_count(arity).unwrap(),
            Arity::from_count(outer).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn arity_cap() {
        assert_eq!(Arity::from_count(0), None);
        assert_eq!(Arity::from_count(4), None);
        assert_eq!(Arity::from_count(3), Some(Arity::Three));
    }

    #[test]
    fn shape_order() {
        let outers = |v: Vec<WrapperShape>| v.iter().map(|s| s.outer().get()).collect::<Vec<_>>();
        assert_eq!(outers(Arity::Three.narrowing_shapes()), vec![3, 2, 1]);
        assert_eq!(outers(Arity::Three.lifting_shapes()), vec![3, 1, 2]);
        assert_eq!(outers(Arity::Two.narrowing_shapes()), vec![2, 1]);
        assert_eq!(outers(Arity::Two.lifting_shapes()), vec![2, 1]);
        assert_eq!(outers(Arity::One.lifting_shapes()), vec![1]);
    }

    #[test]
    fn outer_cannot_exceed_arity() {
        assert!(WrapperShape::new(Arity::One, Arity::Two).is_none());
    }

    #[test]
    fn rendered_shapes() {
        let (cp, types) = setup();
        let w = TypeExpr::class("p.Triple.µ");
        let render = |s: WrapperShape| {
            apply(&cp, &types, s, w.clone(), &args(s.arity().get()))
                .unwrap()
                .unwrap()
                .to_string()
        };
        assert_eq!(render(shape(1, 1)), "Higher1<Triple.µ, A>");
        assert_eq!(render(shape(2, 1)), "Higher1<Higher1<Triple.µ, A>, B>");
        assert_eq!(render(shape(3, 3)), "Higher3<Triple.µ, A, B, C>");
        assert_eq!(render(shape(3, 2)), "Higher2<Higher1<Triple.µ, A>, B, C>");
        assert_eq!(
            render(shape(3, 1)),
            "Higher1<Higher1<Higher1<Triple.µ, A>, B>, C>"
        );
    }

    #[test]
    fn wrong_argument_count_is_an_error() {
        let (cp, types) = setup();
        let err = apply(&cp, &types, shape(2, 2), TypeExpr::class("W"), &args(1)).unwrap_err();
        assert_eq!(err, SynthError::ShapeArguments { expected: 2, actual: 1 });
    }

    #[test]
    fn missing_applier_yields_none() {
        let names = WellKnownNames::default();
        let cp = ClassPath::from_config(&Config::default()).without(&names.higher2);
        let types = WrapperTypes::resolve(&cp, &names);
        let w = TypeExpr::class("W");
        assert!(apply(&cp, &types, shape(3, 2), w.clone(), &args(3)).unwrap().is_none());
        assert!(apply(&cp, &types, shape(3, 1), w, &args(3)).unwrap().is_some());
    }

    #[test]
    fn every_nesting_unwraps_to_the_same_tuple() {
        let (cp, types) = setup();
        let w = TypeExpr::class("p.Triple.µ");
        let built: Vec<TypeExpr> = Arity::Three
            .narrowing_shapes()
            .into_iter()
            .map(|s| apply(&cp, &types, s, w.clone(), &args(3)).unwrap().unwrap())
            .collect();
        for expr in &built {
            assert_eq!(unwrap(&types, expr), Some((w.clone(), args(3))));
            assert!(equivalent(&types, expr, &built[0]));
        }
    }

    #[test]
    fn shape_of_recovers_the_shape() {
        let (cp, types) = setup();
        for arity in Arity::ALL {
            for s in arity.narrowing_shapes() {
                let expr = apply(&cp, &types, s, TypeExpr::class("W"), &args(arity.get()))
                    .unwrap()
                    .unwrap();
                assert_eq!(shape_of(&types, &expr), Some(s));
            }
        }
    }

    #[test]
    fn shape_of_rejects_binary_below_unary() {
        let (cp, types) = setup();
        let names = WellKnownNames::default();
        let inner = cp
            .instantiate(
                types.applier(2).unwrap(),
                vec![TypeExpr::class("W"), TypeExpr::class("p.A"), TypeExpr::class("p.B")],
            )
            .unwrap();
        let outer = TypeExpr::Class {
            name: names.higher1.clone(),
            args: vec![inner, TypeExpr::class("p.C")],
        };
        assert!(unwrap(&types, &outer).is_some());
        assert_eq!(shape_of(&types, &outer), None);
    }

    #[test]
    fn different_arguments_are_not_equivalent() {
        let (cp, types) = setup();
        let w = TypeExpr::class("W");
        let a = apply(&cp, &types, shape(2, 2), w.clone(), &args(2)).unwrap().unwrap();
        let swapped: Vec<TypeExpr> = args(2).into_iter().rev().collect();
        let b = apply(&cp, &types, shape(2, 1), w, &swapped).unwrap().unwrap();
        assert!(!equivalent(&types, &a, &b));
        assert!(!equivalent(&types, &TypeExpr::class("W"), &a));
    }
}
