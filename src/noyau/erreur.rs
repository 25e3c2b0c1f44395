// src/noyau/erreur.rs
//
// Taxonomie des échecs du noyau.
// - Chaque opération publique renvoie Result<_, CalcError>.
// - Aucun échec n’est fatal : le noyau reste utilisable après une erreur.
// - Le noyau ne journalise pas ses erreurs : c’est la coque (UI) qui les affiche.

use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Error)]
pub enum CalcError {
    /// Texte illisible ou construction hors grammaire (identifiant inconnu, etc.).
    #[error("expression invalide : {0}")]
    InvalidExpression(String),

    /// Violation propre au polynôme (facteur non constant, exposant refusé, variable invalide).
    #[error("polynôme invalide : {0}")]
    InvalidPolynomial(String),

    /// Précondition numérique violée (√ négative, log hors domaine).
    #[error("hors domaine : {0}")]
    Domain(String),

    /// Diviseur nul explicite, ou résultat final non fini (« valeur indéfinie »).
    #[error("{0}")]
    DivisionByZero(String),

    #[error("{name} attend {expected} argument(s)")]
    Arity { name: String, expected: String },

    /// Fonction inconnue du répartiteur.
    #[error("fonction non supportée : '{0}'")]
    Unsupported(String),
}

/// Étiquette sans charge utile (pratique pour la coque et les tests).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CalcErrorKind {
    InvalidExpression,
    InvalidPolynomial,
    Domain,
    DivisionByZero,
    Arity,
    Unsupported,
}

impl CalcError {
    pub fn kind(&self) -> CalcErrorKind {
        match self {
            CalcError::InvalidExpression(_) => CalcErrorKind::InvalidExpression,
            CalcError::InvalidPolynomial(_) => CalcErrorKind::InvalidPolynomial,
            CalcError::Domain(_) => CalcErrorKind::Domain,
            CalcError::DivisionByZero(_) => CalcErrorKind::DivisionByZero,
            CalcError::Arity { .. } => CalcErrorKind::Arity,
            CalcError::Unsupported(_) => CalcErrorKind::Unsupported,
        }
    }

    pub(crate) fn invalide(msg: impl Into<String>) -> Self {
        CalcError::InvalidExpression(msg.into())
    }

    pub(crate) fn polynome(msg: impl Into<String>) -> Self {
        CalcError::InvalidPolynomial(msg.into())
    }

    pub(crate) fn domaine(msg: impl Into<String>) -> Self {
        CalcError::Domain(msg.into())
    }

    pub(crate) fn division_par_zero() -> Self {
        CalcError::DivisionByZero("division par zéro".into())
    }

    pub(crate) fn valeur_indefinie() -> Self {
        CalcError::DivisionByZero("valeur indéfinie".into())
    }

    pub(crate) fn arite(name: &str, expected: impl Into<String>) -> Self {
        CalcError::Arity {
            name: name.to_string(),
            expected: expected.into(),
        }
    }
}
