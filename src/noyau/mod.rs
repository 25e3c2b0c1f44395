//! Noyau de la calculatrice scientifique
//!
//! Organisation interne :
//! - erreur.rs      : CalcError (catégories typées, messages FR)
//! - contexte.rs    : EvaluationContext (unité d’angle + précision d’arrondi)
//! - primitives.rs  : opérations numériques pures + constantes (pi, e)
//! - repartiteur.rs : registre nom -> fonction (sin, log, pow…)
//! - jetons.rs      : tokenisation
//! - rpn.rs         : shunting-yard + construction Expr
//! - expr.rs        : arbre syntaxique
//! - eval.rs        : pipeline complet (parse -> éval -> fini -> arrondi)
//! - polynome.rs    : dérivée / primitive de polynômes
//! - format.rs      : affichage canonique des polynômes

pub mod contexte;
pub mod erreur;
pub mod eval;
pub mod expr;
pub mod format;
pub mod jetons;
pub mod polynome;
pub mod primitives;
pub mod repartiteur;
pub mod rpn;

#[cfg(test)]
mod tests_scientifiques;

#[cfg(test)]
mod tests_proprietes;

// API publique
pub use contexte::{AngleUnit, EvaluationContext, PRECISION_DEFAUT};
pub use erreur::{CalcError, CalcErrorKind};
pub use eval::{evaluate_expression, CalculatorEngine, Demarche};
pub use polynome::{differentiate, integrate, Polynomial, DEFAULT_VARIABLE};
pub use repartiteur::{FunctionDispatcher, FunctionRegistry, Handler};
