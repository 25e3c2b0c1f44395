// src/noyau/primitives.rs
//
// Primitives numériques (f64).
// - Arithmétique : totale, sauf divide (diviseur nul refusé).
// - power : peut produire inf/NaN (ex: (-8)^(1/3)) ; c’est l’étape finale du
//   moteur qui rejette les valeurs non finies, pas ici.
// - Transcendantes : domaines vérifiés avant calcul.

use super::contexte::AngleUnit;
use super::erreur::CalcError;

/// Nombre d’Euler (base de ln).
pub const EULER: f64 = std::f64::consts::E;

/// Constantes nommées reconnues par le moteur (table fixe, jamais mutée).
const CONSTANTES: [(&str, f64); 3] = [
    ("pi", std::f64::consts::PI),
    ("π", std::f64::consts::PI),
    ("e", EULER),
];

/// Valeur d’une constante nommée (`pi`, `π`, `e`).
pub fn constante(name: &str) -> Option<f64> {
    CONSTANTES
        .iter()
        .find(|(nom, _)| *nom == name)
        .map(|(_, v)| *v)
}

pub fn add(lhs: f64, rhs: f64) -> f64 {
    lhs + rhs
}

pub fn subtract(lhs: f64, rhs: f64) -> f64 {
    lhs - rhs
}

pub fn multiply(lhs: f64, rhs: f64) -> f64 {
    lhs * rhs
}

/// `lhs / rhs`, refusé si `rhs == 0` (comme une calculatrice classique).
pub fn divide(lhs: f64, rhs: f64) -> Result<f64, CalcError> {
    if rhs == 0.0 {
        return Err(CalcError::division_par_zero());
    }
    Ok(lhs / rhs)
}

pub fn power(base: f64, exponent: f64) -> f64 {
    base.powf(exponent)
}

pub fn sine(value: f64, unit: AngleUnit) -> f64 {
    unit.to_radians(value).sin()
}

pub fn cosine(value: f64, unit: AngleUnit) -> f64 {
    unit.to_radians(value).cos()
}

pub fn tangent(value: f64, unit: AngleUnit) -> f64 {
    unit.to_radians(value).tan()
}

/// log_base(value). `value` > 0, `base` > 0 et `base` != 1.
pub fn logarithm(value: f64, base: f64) -> Result<f64, CalcError> {
    if value <= 0.0 {
        return Err(CalcError::domaine(
            "le logarithme n’est défini que pour des valeurs positives",
        ));
    }
    if base <= 0.0 || base == 1.0 {
        return Err(CalcError::domaine(
            "la base du logarithme doit être positive et différente de 1",
        ));
    }

    // bases usuelles : fonctions dédiées (plus exactes que ln(v)/ln(b))
    if base == 10.0 {
        return Ok(value.log10());
    }
    if base == EULER {
        return Ok(value.ln());
    }
    Ok(value.ln() / base.ln())
}

pub fn exponential(value: f64) -> f64 {
    value.exp()
}

pub fn square_root(value: f64) -> Result<f64, CalcError> {
    if value < 0.0 {
        return Err(CalcError::domaine(
            "la racine carrée n’est définie que pour des valeurs positives ou nulles",
        ));
    }
    Ok(value.sqrt())
}
