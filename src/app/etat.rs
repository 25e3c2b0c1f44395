//! src/app/etat.rs
//!
//! État UI (sans vue).
//!
//! Rôle : contenir l’état de la calculatrice (entrée, variable, résultat, erreur,
//! démarche, réglages) et offrir des opérations simples (C/CLR/AC) sans logique
//! d’affichage.
//!
//! Contrats :
//! - Aucune évaluation ici : le moteur est seulement tenu à jour.
//! - Le contexte du moteur est remplacé en bloc à chaque changement de réglage.
//! - Bornes sur la précision (1..=PRECISION_MAX).

use std::num::NonZeroU32;

use calculatrice_scientifique::noyau::{
    AngleUnit, CalculatorEngine, Demarche, EvaluationContext, DEFAULT_VARIABLE, PRECISION_DEFAUT,
};

/// Garde-fou : au-delà, f64 n’a plus de chiffres significatifs à arrondir.
pub const PRECISION_MAX: u32 = 15;

#[derive(Clone, Debug)]
pub struct AppCalc {
    // --- entrée utilisateur ---
    pub entree: String,
    pub variable: String, // variable des polynômes (d/dx, ∫dx)

    // --- sorties ---
    pub operation: String, // "=", "d/dx" ou "∫dx" : ce qui a produit `resultat`
    pub resultat: String,
    pub erreur: String,

    // --- démarche (panneau d’explication) ---
    pub demarche: Demarche,

    // --- paramètres ---
    pub angle_unit: AngleUnit,
    pub precision: u32,

    // --- UX ---
    // Permet à vue.rs de redonner le focus à l’entrée après un clic sur un bouton.
    pub focus_entree: bool,

    moteur: CalculatorEngine,
}

impl Default for AppCalc {
    fn default() -> Self {
        Self {
            entree: String::new(),
            variable: DEFAULT_VARIABLE.to_string(),
            operation: String::new(),
            resultat: String::new(),
            erreur: String::new(),
            demarche: Demarche::default(),
            angle_unit: AngleUnit::default(),
            precision: PRECISION_DEFAUT,
            focus_entree: true, // au lancement, on veut pouvoir taper tout de suite
            moteur: CalculatorEngine::new(),
        }
    }
}

impl AppCalc {
    /* ------------------------ Réglages ------------------------ */

    /// Contexte d’évaluation correspondant aux réglages courants.
    pub fn contexte(&self) -> EvaluationContext {
        let p = NonZeroU32::new(self.precision).unwrap_or(NonZeroU32::MIN);
        EvaluationContext::new(self.angle_unit, p)
    }

    pub fn moteur(&self) -> &CalculatorEngine {
        &self.moteur
    }

    fn synchro_moteur(&mut self) {
        let ctx = self.contexte();
        tracing::debug!(unite = %ctx.angle_unit(), precision = ctx.precision().get(), "contexte remplacé");
        self.moteur.set_context(ctx);
    }

    /// Garde-fou : précision bornée à 1..=PRECISION_MAX.
    pub fn set_precision(&mut self, precision: u32) {
        self.precision = precision.clamp(1, PRECISION_MAX);
        self.synchro_moteur();
        self.focus_entree = true;
    }

    pub fn set_angle_unit(&mut self, unit: AngleUnit) {
        self.angle_unit = unit;
        self.synchro_moteur();
        self.focus_entree = true;
    }

    /* ------------------------ Actions “boutons” (état seulement) ------------------------ */

    /// AC : remise à zéro totale (entrée + résultats + réglages par défaut).
    pub fn reset_total(&mut self) {
        self.entree.clear();
        self.variable = DEFAULT_VARIABLE.to_string();
        self.clear_resultats();
        self.angle_unit = AngleUnit::default();
        self.precision = PRECISION_DEFAUT;
        self.synchro_moteur();
        self.focus_entree = true;
    }

    /// C : effacer seulement l’entrée (sans toucher aux résultats).
    pub fn clear_entree(&mut self) {
        self.entree.clear();
        self.focus_entree = true;
    }

    /// CLR : effacer résultat + erreur + démarche (sans toucher à l’entrée).
    pub fn clear_resultats(&mut self) {
        self.operation.clear();
        self.resultat.clear();
        self.erreur.clear();
        self.demarche = Demarche::default();
        self.focus_entree = true;
    }

    /// Place une erreur ; le dernier résultat reste affiché, la démarche est effacée.
    pub fn set_erreur(&mut self, msg: impl Into<String>) {
        self.erreur = msg.into();
        self.demarche = Demarche::default();
        self.focus_entree = true;
    }

    /// Dépose un résultat complet.
    pub fn set_resultat(
        &mut self,
        operation: impl Into<String>,
        resultat: impl Into<String>,
        demarche: Demarche,
    ) {
        self.erreur.clear();
        self.operation = operation.into();
        self.resultat = resultat.into();
        self.demarche = demarche;
        self.focus_entree = true;
    }
}
