// src/app/vue.rs
//
// Vue (UI egui) : natif + web
// ---------------------------
// Objectifs :
// - Même AppCalc (etat.rs) pour natif + wasm
// - Clavier : Enter évalue (quand le champ est focus)
// - Tactile : gros boutons, focus redonné après clic (focus_entree)
// - Trois calculs : "=" (arithmétique), "d/dx" et "∫dx" (polynômes)
//
// Note :
// - PAS de Key::NumEnter (n’existe pas dans egui 0.33.x)

use eframe::egui;

use calculatrice_scientifique::noyau::{differentiate, integrate, AngleUnit, CalcError};

use super::etat::{AppCalc, PRECISION_MAX};

impl AppCalc {
    /// UI principale : à appeler depuis eframe::App::update(...)
    pub fn ui(&mut self, ui: &mut egui::Ui) {
        // Densité “calc”
        ui.spacing_mut().item_spacing = egui::vec2(6.0, 6.0);

        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.heading("Calculatrice scientifique");
                ui.add_space(6.0);

                self.ui_entree(ui);

                ui.add_space(8.0);
                ui.separator();
                ui.add_space(8.0);

                self.ui_resultat(ui);

                ui.add_space(8.0);
                ui.separator();
                ui.add_space(8.0);

                self.ui_demarche(ui);
            });
    }

    fn ui_entree(&mut self, ui: &mut egui::Ui) {
        ui.label("Entrée :");

        let resp = ui.add(
            egui::TextEdit::singleline(&mut self.entree)
                .desired_width(ui.available_width())
                .hint_text("Ex: 2^3 + sqrt(16), sin(pi/2), 3*x**2 + 2*x")
                .id_source("entree_edit")
                .code_editor(),
        );

        if self.focus_entree {
            resp.request_focus();
            self.focus_entree = false;
        }

        // Enter évalue seulement si le champ est focus.
        let enter = ui.input(|i| i.key_pressed(egui::Key::Enter));
        if resp.has_focus() && enter {
            self.calculer(Calcul::Evaluer);
        }

        ui.add_space(6.0);

        // Actions + réglages
        ui.horizontal(|ui| {
            // Contrat: C = entrée seulement ; CLR = résultats seulement ; AC = tout
            self.bouton_action(ui, "C", "Efface seulement l’entrée", Action::ClearEntree);
            self.bouton_action(
                ui,
                "CLR",
                "Efface résultat + erreur + démarche",
                Action::ClearResultats,
            );
            self.bouton_action(ui, "AC", "Remise à zéro totale", Action::ResetTotal);

            ui.separator();

            let mut unite = self.angle_unit;
            ui.radio_value(&mut unite, AngleUnit::Radian, "rad");
            ui.radio_value(&mut unite, AngleUnit::Degree, "deg");
            if unite != self.angle_unit {
                self.set_angle_unit(unite);
            }

            ui.separator();

            ui.label("Précision :");
            let mut p = self.precision;
            let resp = ui.add(
                egui::DragValue::new(&mut p)
                    .speed(1)
                    .range(1..=PRECISION_MAX)
                    .suffix(" déc."),
            );
            if resp.changed() {
                self.set_precision(p);
            }
        });

        ui.add_space(8.0);

        // Opérateurs + fonctions + calculs
        ui.horizontal_wrapped(|ui| {
            self.bouton_insert(ui, "(", "(", InsertKind::OpenParen);
            self.bouton_insert(ui, ")", ")", InsertKind::CloseParen);
            self.bouton_insert(ui, ",", ", ", InsertKind::Digit);

            self.bouton_insert(ui, "+", "+", InsertKind::Op);
            self.bouton_insert(ui, "-", "-", InsertKind::Op);
            self.bouton_insert(ui, "*", "*", InsertKind::Op);
            self.bouton_insert(ui, "/", "/", InsertKind::Op);
            self.bouton_insert(ui, "^", "^", InsertKind::Op);

            ui.separator();

            self.bouton_insert(ui, "pi", "pi", InsertKind::Word);
            self.bouton_insert(ui, "e", "e", InsertKind::Word);
            for f in ["sin", "cos", "tan", "log", "ln", "exp", "sqrt", "pow"] {
                self.bouton_insert(ui, f, &format!("{f}("), InsertKind::Func);
            }

            ui.separator();

            let var = self.variable.clone();
            self.bouton_insert(ui, &var, &var, InsertKind::Word);
            self.bouton_insert(ui, "**", "**", InsertKind::Op);
        });

        ui.add_space(8.0);

        ui.horizontal(|ui| {
            ui.label("Variable :");
            ui.add(
                egui::TextEdit::singleline(&mut self.variable)
                    .desired_width(60.0)
                    .id_source("variable_edit")
                    .code_editor(),
            );

            ui.add_space(10.0);

            self.bouton_calcul(ui, "=", "Évalue l’expression", Calcul::Evaluer);
            self.bouton_calcul(ui, "d/dx", "Dérivée du polynôme", Calcul::Deriver);
            self.bouton_calcul(ui, "∫dx", "Primitive du polynôme", Calcul::Integrer);
        });

        ui.add_space(8.0);

        self.ui_pave_numerique(ui);

        if !self.erreur.is_empty() {
            ui.add_space(6.0);
            ui.colored_label(ui.visuals().error_fg_color, &self.erreur);
        }
    }

    fn ui_pave_numerique(&mut self, ui: &mut egui::Ui) {
        egui::Grid::new("pave_numerique")
            .num_columns(4)
            .spacing([6.0, 6.0])
            .show(ui, |ui| {
                for ligne in [["7", "8", "9"], ["4", "5", "6"], ["1", "2", "3"]] {
                    for c in ligne {
                        self.bouton_insert(ui, c, c, InsertKind::Digit);
                    }
                    ui.end_row();
                }

                self.bouton_insert(ui, "0", "0", InsertKind::Digit);
                self.bouton_insert(ui, ".", ".", InsertKind::Digit);
                self.bouton_action(ui, "DEL", "Efface le dernier caractère", Action::Backspace);
                ui.end_row();
            });
    }

    fn ui_resultat(&mut self, ui: &mut egui::Ui) {
        if self.operation.is_empty() {
            ui.label("Résultat :");
        } else {
            ui.label(format!("Résultat ({}) :", self.operation));
        }
        Self::champ_monospace(ui, "resultat_out", &self.resultat, 2);
    }

    fn ui_demarche(&mut self, ui: &mut egui::Ui) {
        egui::CollapsingHeader::new("Démarche")
            .default_open(true)
            .show(ui, |ui| {
                Self::champ_demarche(ui, "Jetons", "demarche_jetons", &self.demarche.jetons);
                Self::champ_demarche(ui, "RPN", "demarche_rpn", &self.demarche.rpn);
                Self::champ_demarche(ui, "Arbre", "demarche_arbre", &self.demarche.arbre);
            });
    }

    fn champ_demarche(ui: &mut egui::Ui, titre: &str, id: &str, contenu: &str) {
        ui.add_space(4.0);
        ui.label(format!("{titre} :"));
        Self::champ_monospace(ui, id, contenu, 1);
    }

    fn champ_monospace(ui: &mut egui::Ui, id: &str, contenu: &str, rows: usize) {
        // Lecture seule, cadre visuel via Frame + Label monospace.
        egui::Frame::group(ui.style())
            .fill(ui.visuals().extreme_bg_color)
            .show(ui, |ui| {
                ui.push_id(id, |ui| {
                    ui.set_min_width(ui.available_width());
                    ui.set_min_height(
                        rows as f32 * ui.text_style_height(&egui::TextStyle::Monospace),
                    );
                    ui.monospace(contenu);
                });
            });
    }

    fn bouton_action(&mut self, ui: &mut egui::Ui, label: &str, tip: &str, action: Action) {
        let resp = ui
            .add_sized([56.0, 30.0], egui::Button::new(label))
            .on_hover_text(tip);

        if resp.clicked() {
            match action {
                Action::ClearEntree => self.clear_entree(),
                Action::ClearResultats => self.clear_resultats(),
                Action::ResetTotal => self.reset_total(),
                Action::Backspace => {
                    self.entree.pop();
                }
            }
            self.focus_entree = true;
        }
    }

    fn bouton_calcul(&mut self, ui: &mut egui::Ui, label: &str, tip: &str, calcul: Calcul) {
        let resp = ui
            .add_sized([64.0, 32.0], egui::Button::new(label))
            .on_hover_text(tip);
        if resp.clicked() {
            self.calculer(calcul);
        }
    }

    fn bouton_insert(&mut self, ui: &mut egui::Ui, label: &str, to_insert: &str, kind: InsertKind) {
        let resp = ui.add_sized([46.0, 28.0], egui::Button::new(label));
        if !resp.clicked() || to_insert.is_empty() {
            return;
        }

        match kind {
            InsertKind::CloseParen => {
                while self.entree.ends_with(' ') {
                    self.entree.pop();
                }
                self.entree.push_str(to_insert);
            }
            InsertKind::Op => {
                while self.entree.ends_with(' ') {
                    self.entree.pop();
                }
                if !self.entree.is_empty() {
                    self.entree.push(' ');
                }
                self.entree.push_str(to_insert);
                self.entree.push(' ');
            }
            // Pas de multiplication implicite : aucun espace automatique.
            InsertKind::OpenParen | InsertKind::Func | InsertKind::Digit | InsertKind::Word => {
                self.entree.push_str(to_insert);
            }
        }

        self.focus_entree = true;
    }

    /// Lance un calcul via le noyau, puis dépose résultat/erreur/démarche dans l’état UI.
    fn calculer(&mut self, calcul: Calcul) {
        let entree = self.entree.trim().to_string();

        let issue: Result<(String, _), CalcError> = match calcul {
            Calcul::Evaluer => self
                .moteur()
                .evaluate_with_steps(&entree)
                .map(|(v, d)| (v.to_string(), d)),
            Calcul::Deriver => {
                differentiate(&entree, self.variable.trim()).map(|s| (s, Default::default()))
            }
            Calcul::Integrer => {
                integrate(&entree, self.variable.trim()).map(|s| (s, Default::default()))
            }
        };

        match issue {
            Ok((resultat, demarche)) => self.set_resultat(calcul.symbole(), resultat, demarche),
            Err(e) => {
                tracing::debug!(erreur = %e, categorie = ?e.kind(), "calcul refusé");
                self.set_erreur(e.to_string());
            }
        }
    }
}

#[derive(Clone, Copy, Debug)]
enum Calcul {
    Evaluer,
    Deriver,
    Integrer,
}

impl Calcul {
    fn symbole(self) -> &'static str {
        match self {
            Calcul::Evaluer => "=",
            Calcul::Deriver => "d/dx",
            Calcul::Integrer => "∫dx",
        }
    }
}

#[derive(Clone, Copy, Debug)]
enum Action {
    ClearEntree,
    ClearResultats,
    ResetTotal,
    Backspace,
}

#[derive(Clone, Copy, Debug)]
enum InsertKind {
    Digit,
    Word,
    Func,
    Op,
    OpenParen,
    CloseParen,
}
