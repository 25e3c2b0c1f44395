// src/noyau/polynome.rs
//
// Calcul polynomial à une variable : parse -> dérivée / primitive -> texte canonique.
//
// Grammaire acceptée (sous-ensemble des jetons/RPN du moteur) :
// - nombre, la variable, + et - unaires
// - a + b, a - b
// - a * b si au moins un côté se réduit à une constante
// - variable ** n (ou ^) avec n constante entière >= 0
// Tout le reste => InvalidPolynomial.
//
// Représentation creuse : exposant -> coefficient, zéros élagués,
// sauf le polynôme nul canonique {0: 0.0}. Coefficients finis uniquement.

use std::collections::BTreeMap;
use std::ops::{Add, Neg, Sub};

use num_traits::ToPrimitive;

use super::erreur::CalcError;
use super::expr::{BinaryOp, Expr, UnaryOp};
use super::format::format_polynome;
use super::rpn;

/// Variable par défaut de la coque.
pub const DEFAULT_VARIABLE: &str = "x";

#[derive(Clone, Debug, PartialEq)]
pub struct Polynomial {
    variable: String,
    termes: BTreeMap<u32, f64>,
}

impl Default for Polynomial {
    fn default() -> Self {
        Self::zero()
    }
}

impl Polynomial {
    /// Polynôme nul canonique {0: 0.0}.
    pub fn zero() -> Self {
        Self::constant(0.0)
    }

    pub fn constant(c: f64) -> Self {
        Self::from_terms([(0, c)])
    }

    /// c * var^p
    pub fn monomial(p: u32, c: f64) -> Self {
        Self::from_terms([(p, c)])
    }

    /// Construit à partir de (exposant, coefficient), en fusionnant les termes semblables.
    pub fn from_terms<I>(terms: I) -> Self
    where
        I: IntoIterator<Item = (u32, f64)>,
    {
        let mut termes = BTreeMap::new();
        for (p, c) in terms {
            *termes.entry(p).or_insert(0.0) += c;
        }
        Self {
            variable: DEFAULT_VARIABLE.to_string(),
            termes,
        }
        .normalise()
    }

    /// Même polynôme, affiché dans la variable `variable`.
    pub fn with_variable(mut self, variable: impl Into<String>) -> Self {
        self.variable = variable.into();
        self
    }

    pub fn variable(&self) -> &str {
        &self.variable
    }

    /// Construit à partir de termes, en gardant la variable de `self`.
    fn avec_termes<I>(&self, terms: I) -> Self
    where
        I: IntoIterator<Item = (u32, f64)>,
    {
        Self::from_terms(terms).with_variable(self.variable.clone())
    }

    fn normalise(mut self) -> Self {
        self.termes.retain(|_, c| *c != 0.0);
        if self.termes.is_empty() {
            self.termes.insert(0, 0.0);
        }
        self
    }

    pub fn is_zero(&self) -> bool {
        self.termes.values().all(|c| *c == 0.0)
    }

    /// Faux si un coefficient a débordé (inf) ou est indéfini (NaN).
    pub fn is_finite(&self) -> bool {
        self.termes.values().all(|c| c.is_finite())
    }

    /// Coefficient du terme de degré `p` (0 si absent).
    pub fn coefficient(&self, p: u32) -> f64 {
        self.termes.get(&p).copied().unwrap_or(0.0)
    }

    pub fn degree(&self) -> u32 {
        self.termes.keys().next_back().copied().unwrap_or(0)
    }

    /// Termes (exposant, coefficient) par exposant croissant.
    pub fn terms(&self) -> impl DoubleEndedIterator<Item = (u32, f64)> + '_ {
        self.termes.iter().map(|(p, c)| (*p, *c))
    }

    /// Valeur si le polynôme est constant.
    pub fn as_constant(&self) -> Option<f64> {
        if self.degree() == 0 {
            Some(self.coefficient(0))
        } else {
            None
        }
    }

    pub fn scale(&self, k: f64) -> Self {
        self.avec_termes(self.terms().map(|(p, c)| (p, c * k)))
    }

    /// Règle de puissance : c*x^p -> c*p*x^(p-1) ; la constante disparaît.
    pub fn derivative(&self) -> Self {
        self.avec_termes(
            self.terms()
                .filter(|(p, _)| *p > 0)
                .map(|(p, c)| (p - 1, c * f64::from(p))),
        )
    }

    /// c*x^p -> c/(p+1) * x^(p+1), sans constante d’intégration.
    pub fn antiderivative(&self) -> Self {
        self.avec_termes(self.terms().map(|(p, c)| {
            let n = p.saturating_add(1);
            (n, c / f64::from(n))
        }))
    }

    /// Lit un polynôme en `variable` depuis du texte.
    pub fn parse(text: &str, variable: &str) -> Result<Self, CalcError> {
        verifie_variable(variable)?;

        let s = text.trim();
        if s.is_empty() {
            return Err(CalcError::polynome("entrée vide"));
        }

        let arbre = rpn::parse(s).map_err(|e| match e {
            CalcError::InvalidExpression(msg) => CalcError::InvalidPolynomial(msg),
            autre => autre,
        })?;
        tracing::debug!(arbre = %arbre, variable, "polynôme analysé");

        let p = reduire(&arbre, variable)?.with_variable(variable);
        fini(p, "lecture")
    }
}

impl Add for Polynomial {
    type Output = Polynomial;

    fn add(self, rhs: Polynomial) -> Polynomial {
        Polynomial::from_terms(self.termes.into_iter().chain(rhs.termes))
            .with_variable(self.variable)
    }
}

impl Neg for Polynomial {
    type Output = Polynomial;

    fn neg(self) -> Polynomial {
        self.scale(-1.0)
    }
}

impl Sub for Polynomial {
    type Output = Polynomial;

    fn sub(self, rhs: Polynomial) -> Polynomial {
        self + (-rhs)
    }
}

impl std::fmt::Display for Polynomial {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&format_polynome(self, &self.variable))
    }
}

/// Refuse un polynôme dont un coefficient n’est pas fini.
fn fini(p: Polynomial, etape: &str) -> Result<Polynomial, CalcError> {
    if p.is_finite() {
        Ok(p)
    } else {
        Err(CalcError::polynome(format!(
            "coefficient hors capacité ({etape})"
        )))
    }
}

/// Nom de variable : identifiant [a-zA-Z_][a-zA-Z0-9_]*.
fn verifie_variable(variable: &str) -> Result<(), CalcError> {
    let mut chars = variable.chars();
    let premier_ok = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_');
    if premier_ok && chars.all(|c| c.is_ascii_alphanumeric() || c == '_') {
        Ok(())
    } else {
        Err(CalcError::polynome(format!(
            "nom de variable invalide '{variable}'"
        )))
    }
}

/// Réduit l’arbre en polynôme creux (match exhaustif sur Expr).
fn reduire(expr: &Expr, var: &str) -> Result<Polynomial, CalcError> {
    match expr {
        Expr::Num(n) if n.is_finite() => Ok(Polynomial::constant(*n)),
        Expr::Num(n) => Err(CalcError::polynome(format!("nombre hors capacité : {n}"))),

        Expr::Ident(name) if name == var => Ok(Polynomial::monomial(1, 1.0)),
        Expr::Ident(name) => Err(CalcError::polynome(format!(
            "identifiant '{name}' inattendu (variable : '{var}')"
        ))),

        Expr::Unary(UnaryOp::Neg, x) => Ok(-reduire(x, var)?),
        Expr::Unary(UnaryOp::Plus, x) => reduire(x, var),

        Expr::Binary(BinaryOp::Add, a, b) => Ok(reduire(a, var)? + reduire(b, var)?),
        Expr::Binary(BinaryOp::Sub, a, b) => Ok(reduire(a, var)? - reduire(b, var)?),

        Expr::Binary(BinaryOp::Mul, a, b) => {
            let pa = reduire(a, var)?;
            let pb = reduire(b, var)?;
            match (pa.as_constant(), pb.as_constant()) {
                (Some(k), _) => Ok(pb.scale(k)),
                (_, Some(k)) => Ok(pa.scale(k)),
                _ => Err(CalcError::polynome(format!(
                    "la multiplication doit comporter un facteur constant : {expr}"
                ))),
            }
        }

        Expr::Binary(BinaryOp::Pow, base, exposant) => {
            if !matches!(base.as_ref(), Expr::Ident(name) if name == var) {
                return Err(CalcError::polynome(format!(
                    "seule la variable '{var}' peut être élevée à une puissance : {expr}"
                )));
            }
            let n = reduire(exposant, var)?
                .as_constant()
                .and_then(exposant_entier)
                .ok_or_else(|| {
                    CalcError::polynome(format!(
                        "l’exposant doit être une constante entière positive ou nulle : {expr}"
                    ))
                })?;
            Ok(Polynomial::monomial(n, 1.0))
        }

        Expr::Binary(BinaryOp::Div, _, _) => Err(CalcError::polynome(format!(
            "division non supportée : {expr}"
        ))),

        Expr::Call(name, _) => Err(CalcError::polynome(format!(
            "appel de fonction '{name}' non supporté"
        ))),
    }
}

/// Constante -> exposant u32 (entier, >= 0, et p+1 doit rester représentable).
fn exposant_entier(k: f64) -> Option<u32> {
    if k.fract() != 0.0 {
        return None;
    }
    k.to_u32().filter(|n| *n < u32::MAX)
}

/// Dérivée de `text` par rapport à `variable`, sous forme canonique.
pub fn differentiate(text: &str, variable: &str) -> Result<String, CalcError> {
    let p = Polynomial::parse(text, variable)?;
    Ok(fini(p.derivative(), "dérivée")?.to_string())
}

/// Primitive de `text` par rapport à `variable`, sous forme canonique.
pub fn integrate(text: &str, variable: &str) -> Result<String, CalcError> {
    let p = Polynomial::parse(text, variable)?;
    Ok(fini(p.antiderivative(), "primitive")?.to_string())
}
