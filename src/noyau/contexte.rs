// src/noyau/contexte.rs
//
// Contexte d’évaluation : unité d’angle + précision d’arrondi.
// Objet valeur immuable : un changement de réglage = une nouvelle instance.

use std::fmt;
use std::num::NonZeroU32;
use std::str::FromStr;

use thiserror::Error;

/// Précision par défaut (décimales) du résultat final.
pub const PRECISION_DEFAUT: u32 = 8;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum AngleUnit {
    #[default]
    Radian,
    Degree,
}

impl AngleUnit {
    pub fn as_str(self) -> &'static str {
        match self {
            AngleUnit::Radian => "radian",
            AngleUnit::Degree => "degree",
        }
    }

    /// Ramène un angle exprimé dans cette unité en radians.
    pub fn to_radians(self, value: f64) -> f64 {
        match self {
            AngleUnit::Radian => value,
            AngleUnit::Degree => value.to_radians(),
        }
    }
}

impl fmt::Display for AngleUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("unité d’angle inconnue : '{0}' (radian ou degree)")]
pub struct ParseAngleUnitError(pub String);

impl FromStr for AngleUnit {
    type Err = ParseAngleUnitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "radian" | "rad" => Ok(AngleUnit::Radian),
            "degree" | "deg" => Ok(AngleUnit::Degree),
            _ => Err(ParseAngleUnitError(s.to_string())),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EvaluationContext {
    angle_unit: AngleUnit,
    precision: NonZeroU32,
}

impl Default for EvaluationContext {
    fn default() -> Self {
        Self {
            angle_unit: AngleUnit::Radian,
            precision: NonZeroU32::new(PRECISION_DEFAUT).unwrap_or(NonZeroU32::MIN),
        }
    }
}

impl EvaluationContext {
    pub fn new(angle_unit: AngleUnit, precision: NonZeroU32) -> Self {
        Self {
            angle_unit,
            precision,
        }
    }

    pub fn angle_unit(&self) -> AngleUnit {
        self.angle_unit
    }

    pub fn precision(&self) -> NonZeroU32 {
        self.precision
    }

    /// Copie avec une autre unité d’angle.
    pub fn with_angle_unit(self, angle_unit: AngleUnit) -> Self {
        Self { angle_unit, ..self }
    }

    /// Copie avec une autre précision.
    pub fn with_precision(self, precision: NonZeroU32) -> Self {
        Self { precision, ..self }
    }

    /// Ramène `value` en radians selon l’unité configurée.
    pub fn convert_angle(&self, value: f64) -> f64 {
        self.angle_unit.to_radians(value)
    }

    /// Arrondit `value` à `precision` décimales.
    ///
    /// Si l’échelle 10^precision fait sortir des flottants finis, la valeur est
    /// déjà plus fine que ce que f64 peut représenter : on la rend telle quelle.
    pub fn round(&self, value: f64) -> f64 {
        let facteur = 10f64.powi(self.precision.get().min(i32::MAX as u32) as i32);
        let scaled = value * facteur;
        if !facteur.is_finite() || !scaled.is_finite() {
            return value;
        }
        scaled.round() / facteur
    }
}
