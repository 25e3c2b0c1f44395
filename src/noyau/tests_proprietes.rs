//! Tests de propriétés (proptest) : le pipeline complet contre les primitives.
//!
//! Nombre de cas réduit : chaque cas repasse par jetons -> RPN -> Expr.

use proptest::prelude::*;

use super::polynome::Polynomial;
use super::primitives;
use super::{differentiate, evaluate_expression, integrate, EvaluationContext};

/* ------------------------ Stratégies ------------------------ */

/// Opérateur binaire + primitive correspondante (division exclue : voir plus bas).
fn arb_op() -> impl Strategy<Value = (&'static str, fn(f64, f64) -> f64)> {
    prop_oneof![
        Just(("+", primitives::add as fn(f64, f64) -> f64)),
        Just(("-", primitives::subtract as fn(f64, f64) -> f64)),
        Just(("*", primitives::multiply as fn(f64, f64) -> f64)),
    ]
}

/// Polynôme en x : termes (coefficient entier, exposant), texte "c*x**p + ...".
fn arb_polynome() -> impl Strategy<Value = (Vec<(i32, u32)>, String)> {
    prop::collection::vec((-20i32..=20, 0u32..=8), 1..6).prop_map(|termes| {
        let texte = termes
            .iter()
            .map(|(c, p)| format!("{c}*x**{p}"))
            .collect::<Vec<_>>()
            .join(" + ");
        (termes, texte)
    })
}

fn proche(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-9 * b.abs().max(1.0)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /* ------------------------ Arithmétique ------------------------ */

    #[test]
    fn prop_binaire_egale_primitive(a in -1e6f64..1e6, b in -1e6f64..1e6, (op, f) in arb_op()) {
        let ctx = EvaluationContext::default();
        let texte = format!("{a} {op} {b}");
        let v = evaluate_expression(&texte, &ctx);
        prop_assert_eq!(v, Ok(ctx.round(f(a, b))), "texte={}", texte);
    }

    #[test]
    fn prop_division_egale_primitive(a in -1e6f64..1e6, b in -1e6f64..1e6) {
        prop_assume!(b.abs() > 1e-3);
        let ctx = EvaluationContext::default();
        let texte = format!("{a} / {b}");
        let attendu = primitives::divide(a, b).map(|q| ctx.round(q));
        prop_assert_eq!(evaluate_expression(&texte, &ctx), attendu, "texte={}", texte);
    }

    #[test]
    fn prop_arrondi_borne(v in -1e6f64..1e6, p in 1u32..=8) {
        let ctx = EvaluationContext::default()
            .with_precision(std::num::NonZeroU32::new(p).unwrap());
        let ecart = (ctx.round(v) - v).abs();
        prop_assert!(ecart <= 0.5 / 10f64.powi(p as i32) + 1e-9, "v={} p={} ecart={}", v, p, ecart);
    }

    /* ------------------------ Robustesse ------------------------ */

    #[test]
    fn prop_entree_arbitraire_sans_panique(s in "[0-9x+*/^(). ,a-z-]{0,30}") {
        let ctx = EvaluationContext::default();
        if let Ok(v) = evaluate_expression(&s, &ctx) {
            prop_assert!(v.is_finite(), "s={:?} v={}", s, v);
        }
        let _ = differentiate(&s, "x");
        let _ = integrate(&s, "x");
    }

    #[test]
    fn prop_unicode_sans_panique(s in "\\PC{0,40}") {
        let _ = evaluate_expression(&s, &EvaluationContext::default());
        let _ = differentiate(&s, "x");
    }

    /* ------------------------ Polynômes ------------------------ */

    #[test]
    fn prop_derivee_terme_a_terme((termes, texte) in arb_polynome()) {
        let attendu = Polynomial::from_terms(
            termes
                .iter()
                .filter(|(_, p)| *p > 0)
                .map(|(c, p)| (p - 1, f64::from(*c) * f64::from(*p))),
        );
        let obtenu = Polynomial::parse(&differentiate(&texte, "x").unwrap(), "x").unwrap();
        prop_assert_eq!(obtenu, attendu, "texte={}", texte);
    }

    #[test]
    fn prop_derivee_de_primitive((_termes, texte) in arb_polynome()) {
        let origine = Polynomial::parse(&texte, "x").unwrap();
        let prim = integrate(&texte, "x").unwrap();
        let retour = Polynomial::parse(&differentiate(&prim, "x").unwrap(), "x").unwrap();

        prop_assert_eq!(retour.degree(), origine.degree(), "texte={} prim={}", texte, prim);
        for p in 0..=origine.degree() {
            let (a, b) = (retour.coefficient(p), origine.coefficient(p));
            prop_assert!(proche(a, b), "texte={} p={} {} != {}", texte, p, a, b);
        }
    }

    #[test]
    fn prop_forme_canonique_stable((_termes, texte) in arb_polynome()) {
        let une_fois = Polynomial::parse(&texte, "x").unwrap().to_string();
        let deux_fois = Polynomial::parse(&une_fois, "x").unwrap().to_string();
        prop_assert_eq!(une_fois, deux_fois);
    }
}
