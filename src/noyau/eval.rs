//! Noyau : évaluation (pipeline réel)
//!
//! tokenize -> RPN -> Expr -> évaluation récursive -> contrôle fini -> arrondi
//!
//! Aucun état entre deux appels : seul le contexte (unité d’angle, précision)
//! et le registre de fonctions sont conservés par le moteur, et ils ne sont
//! remplacés qu’entre deux évaluations.

use super::contexte::EvaluationContext;
use super::erreur::CalcError;
use super::expr::{BinaryOp, Expr, UnaryOp};
use super::jetons::{format_tokens, tokenize};
use super::primitives;
use super::repartiteur::{FunctionDispatcher, FunctionRegistry};
use super::rpn::{format_rpn, from_rpn, parse, to_rpn};

/// Trace du pipeline pour le panneau “Démarche” de la coque.
#[derive(Default, Clone, Debug, PartialEq)]
pub struct Demarche {
    pub jetons: String,
    pub rpn: String,
    pub arbre: String,
}

#[derive(Clone, Debug, Default)]
pub struct CalculatorEngine<R: FunctionRegistry = FunctionDispatcher> {
    context: EvaluationContext,
    registry: R,
}

impl CalculatorEngine<FunctionDispatcher> {
    /// Moteur avec le contexte par défaut et les fonctions intégrées.
    pub fn new() -> Self {
        Self::with_context(EvaluationContext::default())
    }

    pub fn with_context(context: EvaluationContext) -> Self {
        Self {
            context,
            registry: FunctionDispatcher::new(),
        }
    }
}

impl<R: FunctionRegistry> CalculatorEngine<R> {
    /// Moteur sur un registre fourni (ex: registre vide + fonctions maison).
    pub fn with_registry(context: EvaluationContext, registry: R) -> Self {
        Self { context, registry }
    }

    pub fn context(&self) -> &EvaluationContext {
        &self.context
    }

    /// Remplace le contexte en bloc (jamais de mutation champ par champ).
    pub fn set_context(&mut self, context: EvaluationContext) {
        self.context = context;
    }

    pub fn registry(&self) -> &R {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut R {
        &mut self.registry
    }

    /// Évalue une expression arithmétique et renvoie la valeur arrondie.
    pub fn evaluate(&self, expr_str: &str) -> Result<f64, CalcError> {
        let s = non_vide(expr_str)?;
        let arbre = parse(s)?;
        tracing::debug!(arbre = %arbre, "expression analysée");
        self.finaliser(&arbre)
    }

    /// Comme `evaluate`, avec la démarche (jetons, RPN, arbre) pour la coque.
    pub fn evaluate_with_steps(&self, expr_str: &str) -> Result<(f64, Demarche), CalcError> {
        let s = non_vide(expr_str)?;

        // 1) Jetons
        let jetons = tokenize(s)?;

        // 2) RPN
        let rpn = to_rpn(&jetons)?;

        // 3) AST (Expr)
        let arbre = from_rpn(&rpn)?;

        let d = Demarche {
            jetons: format_tokens(&jetons),
            rpn: format_rpn(&rpn),
            arbre: arbre.to_string(),
        };
        tracing::debug!(jetons = %d.jetons, rpn = %d.rpn, arbre = %d.arbre, "expression analysée");

        Ok((self.finaliser(&arbre)?, d))
    }

    /// Évaluation récursive, valeur finie obligatoire, arrondi final.
    fn finaliser(&self, arbre: &Expr) -> Result<f64, CalcError> {
        let brut = self.eval_expr(arbre)?;

        // inf/NaN : 0^-1, (-8)^(1/3), exp(1000)…
        if !brut.is_finite() {
            return Err(CalcError::valeur_indefinie());
        }

        let v = self.context.round(brut);
        tracing::debug!(brut, arrondi = v, "résultat");
        Ok(v)
    }

    fn eval_expr(&self, expr: &Expr) -> Result<f64, CalcError> {
        match expr {
            Expr::Num(n) => Ok(*n),

            Expr::Ident(name) => primitives::constante(name)
                .ok_or_else(|| CalcError::invalide(format!("identifiant inconnu '{name}'"))),

            Expr::Unary(op, x) => {
                let v = self.eval_expr(x)?;
                Ok(match op {
                    UnaryOp::Neg => -v,
                    UnaryOp::Plus => v,
                })
            }

            Expr::Binary(op, a, b) => {
                let va = self.eval_expr(a)?;
                let vb = self.eval_expr(b)?;
                match op {
                    BinaryOp::Add => Ok(primitives::add(va, vb)),
                    BinaryOp::Sub => Ok(primitives::subtract(va, vb)),
                    BinaryOp::Mul => Ok(primitives::multiply(va, vb)),
                    BinaryOp::Div => primitives::divide(va, vb),
                    BinaryOp::Pow => Ok(primitives::power(va, vb)),
                }
            }

            Expr::Call(name, args) => {
                // arguments de gauche à droite
                let valeurs = args
                    .iter()
                    .map(|a| self.eval_expr(a))
                    .collect::<Result<Vec<f64>, CalcError>>()?;

                self.registry
                    .evaluate(name, &valeurs, &self.context)
                    .map_err(|e| match e {
                        // mauvaise forme d’appel : c’est l’expression qui est invalide
                        CalcError::Arity { .. } => CalcError::invalide(e.to_string()),
                        autre => autre,
                    })
            }
        }
    }
}

fn non_vide(expr_str: &str) -> Result<&str, CalcError> {
    let s = expr_str.trim();
    if s.is_empty() {
        return Err(CalcError::invalide("entrée vide"));
    }
    Ok(s)
}

/// Point d’entrée unique de l’arithmétique : fonctions intégrées + `context`.
pub fn evaluate_expression(expr_str: &str, context: &EvaluationContext) -> Result<f64, CalcError> {
    CalculatorEngine::with_context(*context).evaluate(expr_str)
}
