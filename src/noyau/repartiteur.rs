// src/noyau/repartiteur.rs
//
// Répartiteur de fonctions : nom -> handler.
// - Clés normalisées en minuscules (recherche insensible à la casse).
// - register écrase, unregister est idempotent.
// - Chaque handler vérifie lui-même son arité (ArityError avec nom + nombre attendu).

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use super::contexte::{AngleUnit, EvaluationContext};
use super::erreur::CalcError;
use super::primitives;

/// Handler de fonction : (arguments, contexte) -> valeur ou échec.
pub type Handler = Arc<dyn Fn(&[f64], &EvaluationContext) -> Result<f64, CalcError> + Send + Sync>;

/// Interface du registre consommée par le moteur.
pub trait FunctionRegistry {
    fn register(&mut self, name: &str, handler: Handler);
    fn unregister(&mut self, name: &str);
    fn evaluate(&self, name: &str, args: &[f64], ctx: &EvaluationContext)
        -> Result<f64, CalcError>;
}

#[derive(Clone)]
pub struct FunctionDispatcher {
    handlers: HashMap<String, Handler>,
}

impl fmt::Debug for FunctionDispatcher {
    // Les closures ne sont pas Debug : on affiche seulement les noms.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FunctionDispatcher")
            .field("handlers", &self.names())
            .finish()
    }
}

impl Default for FunctionDispatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl FunctionDispatcher {
    /// Registre pré-rempli avec les fonctions intégrées.
    pub fn new() -> Self {
        let mut d = Self::empty();
        for (name, handler) in handlers_integres() {
            d.register(name, handler);
        }
        d
    }

    /// Registre vide (aucune fonction).
    pub fn empty() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    /// Intégrées + handlers supplémentaires (les supplémentaires gagnent en cas de conflit).
    pub fn with_handlers<'a, I>(extra: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, Handler)>,
    {
        let mut d = Self::new();
        for (name, handler) in extra {
            d.register(name, handler);
        }
        d
    }

    pub fn contains(&self, name: &str) -> bool {
        self.handlers.contains_key(&cle(name))
    }

    /// Noms enregistrés, triés.
    pub fn names(&self) -> Vec<&str> {
        let mut v: Vec<&str> = self.handlers.keys().map(String::as_str).collect();
        v.sort_unstable();
        v
    }
}

impl FunctionRegistry for FunctionDispatcher {
    fn register(&mut self, name: &str, handler: Handler) {
        self.handlers.insert(cle(name), handler);
    }

    fn unregister(&mut self, name: &str) {
        self.handlers.remove(&cle(name));
    }

    fn evaluate(
        &self,
        name: &str,
        args: &[f64],
        ctx: &EvaluationContext,
    ) -> Result<f64, CalcError> {
        let handler = self
            .handlers
            .get(&cle(name))
            .ok_or_else(|| CalcError::Unsupported(name.to_string()))?;

        tracing::trace!(fonction = name, ?args, "appel");
        handler(args, ctx)
    }
}

fn cle(name: &str) -> String {
    name.to_lowercase()
}

/* ------------------------ Fonctions intégrées ------------------------ */

fn exiger<const N: usize>(name: &str, args: &[f64]) -> Result<[f64; N], CalcError> {
    <[f64; N]>::try_from(args).map_err(|_| CalcError::arite(name, N.to_string()))
}

fn angle(name: &'static str, f: fn(f64, AngleUnit) -> f64) -> Handler {
    Arc::new(move |args: &[f64], ctx: &EvaluationContext| {
        let [x] = exiger::<1>(name, args)?;
        Ok(f(x, ctx.angle_unit()))
    })
}

fn unaire(name: &'static str, f: fn(f64) -> Result<f64, CalcError>) -> Handler {
    Arc::new(move |args: &[f64], _ctx: &EvaluationContext| {
        let [x] = exiger::<1>(name, args)?;
        f(x)
    })
}

fn handlers_integres() -> Vec<(&'static str, Handler)> {
    let log: Handler = Arc::new(|args: &[f64], _ctx: &EvaluationContext| match *args {
        [value] => primitives::logarithm(value, 10.0),
        [value, base] => primitives::logarithm(value, base),
        _ => Err(CalcError::arite("log", "1 ou 2")),
    });

    let pow: Handler = Arc::new(|args: &[f64], _ctx: &EvaluationContext| {
        let [base, exposant] = exiger::<2>("pow", args)?;
        Ok(primitives::power(base, exposant))
    });

    vec![
        ("sin", angle("sin", primitives::sine)),
        ("cos", angle("cos", primitives::cosine)),
        ("tan", angle("tan", primitives::tangent)),
        ("log", log),
        (
            "ln",
            unaire("ln", |x| primitives::logarithm(x, primitives::EULER)),
        ),
        ("exp", unaire("exp", |x| Ok(primitives::exponential(x)))),
        ("sqrt", unaire("sqrt", primitives::square_root)),
        ("pow", pow),
    ]
}
