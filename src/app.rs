// src/app.rs
//
// Module App (racine)
// -------------------
// - Déclare etat.rs (état + liaison au service) et vue.rs (egui)
// - Fournit l’impl eframe::App
//
// Clavier : un seul écouteur global, ici. Pas de TextEdit focalisé dans la vue,
// et aucun widget ne garde le focus clavier : Entrée / Espace ne « cliquent »
// jamais un bouton, donc aucune touche n’est vue deux fois.

pub mod etat;
pub mod vue;

pub use etat::AppCalc;

use calculatrice_hote::evenements::actions_clavier;
use eframe::egui;

impl eframe::App for AppCalc {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.frame(ctx);
    }
}

impl AppCalc {
    /// Une frame complète : réponses, clavier, puis vue.
    pub fn frame(&mut self, ctx: &egui::Context) {
        // 1) Réponses de l’hôte arrivées depuis la frame précédente
        self.recevoir_reponses();

        // 2) Clavier global
        let evenements = ctx.input(|i| i.events.clone());
        for action in actions_clavier(&evenements) {
            self.agir(action);
        }

        // 3) Les touches d’activation sont déjà traitées : la vue ne doit pas les revoir.
        retirer_touches_activation(ctx);

        egui::CentralPanel::default().show(ctx, |ui| {
            self.ui(ui);
        });
    }
}

/// Entrée / Espace / Tab : retirés des événements (quels que soient les modificateurs)
/// et focus rendu, pour qu’aucun bouton ne soit activé au clavier.
fn retirer_touches_activation(ctx: &egui::Context) {
    ctx.input_mut(|i| {
        i.events.retain(|ev| {
            !matches!(
                ev,
                egui::Event::Key {
                    key: egui::Key::Enter | egui::Key::Space | egui::Key::Tab,
                    ..
                }
            )
        });
    });

    ctx.memory_mut(|m| {
        if let Some(id) = m.focused() {
            m.surrender_focus(id);
        }
    });
}
