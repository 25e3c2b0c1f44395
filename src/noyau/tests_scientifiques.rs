//! Tests scientifiques (campagne) : invariants + robustesse + limites contrôlées.
//!
//! But : passer par l’API publique du noyau seulement.
//! - arithmétique + priorités
//! - trig radians / degrés, logarithmes
//! - erreurs typées
//! - calcul polynomial (dérivée / primitive, forme canonique)
//! - stress borné (longueur, profondeur) sous budget temps

use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::{Duration, Instant};

use approx::assert_relative_eq;
use pretty_assertions::assert_eq;

use super::{
    differentiate, evaluate_expression, integrate, AngleUnit, CalcError, CalcErrorKind,
    CalculatorEngine, EvaluationContext, FunctionRegistry, Handler,
};

fn ctx(unit: AngleUnit, precision: u32) -> EvaluationContext {
    EvaluationContext::new(unit, NonZeroU32::new(precision).unwrap())
}

fn eval_ok(expr: &str) -> f64 {
    evaluate_expression(expr, &EvaluationContext::default())
        .unwrap_or_else(|e| panic!("expr={expr:?} err={e}"))
}

fn eval_deg(expr: &str) -> f64 {
    evaluate_expression(expr, &ctx(AngleUnit::Degree, 8))
        .unwrap_or_else(|e| panic!("expr={expr:?} err={e}"))
}

fn assert_categorie(expr: &str, attendu: CalcErrorKind) {
    let e = evaluate_expression(expr, &EvaluationContext::default()).expect_err(expr);
    assert_eq!(e.kind(), attendu, "expr={expr:?} err={e}");
}

/// Budget global anti-gel.
fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Arithmétique ------------------------ */

#[test]
fn sci_priorites_et_associativite() {
    assert_eq!(eval_ok("2 + 3 * 4"), 14.0);
    assert_eq!(eval_ok("10 - 4 - 3"), 3.0);
    assert_eq!(eval_ok("100 / 10 / 5"), 2.0);
    assert_eq!(eval_ok("2^3^2"), 512.0);
    assert_eq!(eval_ok("2**3"), 8.0);
    assert_eq!(eval_ok("-2^2"), -4.0);
    assert_eq!(eval_ok("(-2)^2"), 4.0);
    assert_eq!(eval_ok("-(1+2)*3"), -9.0);
    assert_eq!(eval_ok("2 * -3"), -6.0);
    assert_eq!(eval_ok("1.5e3 + .5"), 1500.5);
}

#[test]
fn sci_arrondi_selon_precision() {
    assert_eq!(eval_ok("1/3"), 0.33333333);
    assert_eq!(evaluate_expression("pi", &ctx(AngleUnit::Radian, 2)), Ok(3.14));
    assert_eq!(evaluate_expression("2/3", &ctx(AngleUnit::Radian, 1)), Ok(0.7));
    assert_relative_eq!(
        evaluate_expression("pi", &ctx(AngleUnit::Radian, 15)).unwrap(),
        std::f64::consts::PI,
        epsilon = 1e-15
    );
}

/* ------------------------ Trigonométrie ------------------------ */

#[test]
fn sci_trig_radians() {
    assert_eq!(eval_ok("sin(0)"), 0.0);
    assert_eq!(eval_ok("sin(pi/2)"), 1.0);
    assert_eq!(eval_ok("cos(pi)"), -1.0);
    assert_eq!(eval_ok("tan(pi/4)"), 1.0);
    assert_eq!(eval_ok("SIN(pi/2)"), 1.0);
}

#[test]
fn sci_trig_degres() {
    assert_eq!(eval_deg("sin(30)"), 0.5);
    assert_eq!(eval_deg("cos(60)"), 0.5);
    assert_eq!(eval_deg("cos(180)"), -1.0);
    assert_eq!(eval_deg("tan(45)"), 1.0);
    assert_eq!(eval_deg("sin(-90)"), -1.0);
}

#[test]
fn sci_symetries_trig() {
    for x in ["0.3", "1", "2.5", "pi/5"] {
        assert_eq!(eval_ok(&format!("sin(-{x})")), -eval_ok(&format!("sin({x})")), "x={x}");
        assert_eq!(eval_ok(&format!("cos(-{x})")), eval_ok(&format!("cos({x})")), "x={x}");
    }
}

/* ------------------------ Logarithmes / exponentielle ------------------------ */

#[test]
fn sci_logarithmes() {
    assert_eq!(eval_ok("log(100)"), 2.0);
    assert_eq!(eval_ok("log(100, 10)"), 2.0);
    assert_eq!(eval_ok("log(8, 2)"), 3.0);
    assert_eq!(eval_ok("ln(e)"), 1.0);
    assert_eq!(eval_ok("ln(exp(2))"), 2.0);
    assert_eq!(eval_ok("pow(2, 10)"), 1024.0);
    assert_eq!(eval_ok("sqrt(2)^2"), 2.0);
}

/* ------------------------ Erreurs typées ------------------------ */

#[test]
fn sci_erreurs_par_categorie() {
    assert_categorie("1/0", CalcErrorKind::DivisionByZero);
    assert_categorie("1/(2-2)", CalcErrorKind::DivisionByZero);
    assert_categorie("0^-1", CalcErrorKind::DivisionByZero);

    assert_categorie("sqrt(-4)", CalcErrorKind::Domain);
    assert_categorie("ln(0)", CalcErrorKind::Domain);
    assert_categorie("log(5, 1)", CalcErrorKind::Domain);
    assert_categorie("log(5, -2)", CalcErrorKind::Domain);

    assert_categorie("gamma(3)", CalcErrorKind::Unsupported);

    assert_categorie("sin(x)", CalcErrorKind::InvalidExpression);
    assert_categorie("sqrt()", CalcErrorKind::InvalidExpression);
    assert_categorie("pow(1)", CalcErrorKind::InvalidExpression);
    assert_categorie("log(1, 2, 3)", CalcErrorKind::InvalidExpression);
    assert_categorie("2 3", CalcErrorKind::InvalidExpression);
    assert_categorie("(1 + 2", CalcErrorKind::InvalidExpression);
    assert_categorie("1 + 2)", CalcErrorKind::InvalidExpression);
    assert_categorie("1 # 2", CalcErrorKind::InvalidExpression);
    assert_categorie("", CalcErrorKind::InvalidExpression);
}

#[test]
fn sci_messages_lisibles() {
    let e = evaluate_expression("1/0", &EvaluationContext::default()).unwrap_err();
    assert_eq!(e.to_string(), "division par zéro");

    let e = evaluate_expression("gamma(3)", &EvaluationContext::default()).unwrap_err();
    assert_eq!(e, CalcError::Unsupported("gamma".into()));
}

/* ------------------------ Registre extensible ------------------------ */

#[test]
fn sci_fonction_maison_utilise_le_contexte() {
    let mut moteur = CalculatorEngine::with_context(ctx(AngleUnit::Degree, 4));

    // demi-tour dans l’unité courante
    let demi_tour: Handler = Arc::new(|args: &[f64], c: &EvaluationContext| match *args {
        [] => Ok(match c.angle_unit() {
            AngleUnit::Radian => std::f64::consts::PI,
            AngleUnit::Degree => 180.0,
        }),
        _ => Err(CalcError::Arity {
            name: "demitour".into(),
            expected: "0".into(),
        }),
    });
    moteur.registry_mut().register("demitour", demi_tour);

    assert_eq!(moteur.evaluate("cos(demitour())"), Ok(-1.0));
    assert_eq!(
        moteur.evaluate("demitour(1)").unwrap_err().kind(),
        CalcErrorKind::InvalidExpression
    );
}

/* ------------------------ Polynômes ------------------------ */

#[test]
fn sci_polynomes_derivees() {
    assert_eq!(differentiate("x**3 + 2*x", "x").unwrap(), "3*x**2 + 2");
    assert_eq!(differentiate("7", "x").unwrap(), "0");
    assert_eq!(differentiate("-x**2", "x").unwrap(), "-2*x");
    assert_eq!(differentiate("x**50", "x").unwrap(), "50*x**49");
    assert_eq!(differentiate("(x + 1)*3", "x").unwrap(), "3");
}

#[test]
fn sci_polynomes_primitives() {
    assert_eq!(integrate("3*x**2", "x").unwrap(), "x**3");
    assert_eq!(integrate("3*x**2 + 2*x + 1", "x").unwrap(), "x**3 + x**2 + x");
    assert_eq!(integrate("-1", "x").unwrap(), "-x");
    assert_eq!(integrate("4*y**3", "y").unwrap(), "y**4");
}

#[test]
fn sci_polynomes_refus() {
    for (expr, var) in [
        ("", "x"),
        ("x*x", "x"),
        ("x**-1", "x"),
        ("x**1.5", "x"),
        ("2**x", "x"),
        ("sin(y)", "1x"),
        ("x + 1", ""),
    ] {
        let e = differentiate(expr, var).expect_err(expr);
        assert_eq!(e.kind(), CalcErrorKind::InvalidPolynomial, "expr={expr:?} var={var:?}");
        let e = integrate(expr, var).expect_err(expr);
        assert_eq!(e.kind(), CalcErrorKind::InvalidPolynomial, "expr={expr:?} var={var:?}");
    }
}

/* ------------------------ Stress borné ------------------------ */

#[test]
fn sci_stress_longueur_et_profondeur() {
    let start = Instant::now();
    let max = Duration::from_secs(2);

    // somme longue : 1 + 1 + ... (400 termes, sous la borne de profondeur)
    let somme = vec!["1"; 400].join(" + ");
    assert_eq!(eval_ok(&somme), 400.0);
    budget(start, max);

    // parenthèses imbriquées (profondeur 200)
    let profond = format!("{}2{}", "(".repeat(200), ")".repeat(200));
    assert_eq!(eval_ok(&profond), 2.0);
    budget(start, max);

    // polynôme à 100 termes
    let poly = (0..100)
        .map(|k| format!("x**{k}"))
        .collect::<Vec<_>>()
        .join(" + ");
    let d = differentiate(&poly, "x").unwrap();
    assert!(d.starts_with("99*x**98 + 98*x**97"), "d={d}");
    assert!(d.ends_with("2*x + 1"), "d={d}");
    budget(start, max);
}

#[test]
fn sci_determinisme() {
    let m = CalculatorEngine::new();
    for expr in ["sin(1) + cos(2)", "log(7, 3)", "exp(pi) - pi^e"] {
        let a = m.evaluate(expr);
        let b = m.evaluate(expr);
        assert_eq!(a, b, "expr={expr:?}");
    }
}
