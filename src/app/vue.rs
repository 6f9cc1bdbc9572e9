// src/app/vue.rs
//
// Vue (UI egui)
// -------------
// - Affichage de l’entrée : lecture seule (le clavier passe par app.rs, pas par un TextEdit)
// - Pavé : boutons de `evenements::PAVE`, même effet que les touches
// - Historique repliable

use eframe::egui;

use calculatrice_hote::evenements::{Bouton, PAVE};

use super::etat::AppCalc;

const TAILLE_BOUTON: [f32; 2] = [56.0, 40.0];

impl AppCalc {
    /// UI principale : à appeler depuis eframe::App::update(...)
    pub fn ui(&mut self, ui: &mut egui::Ui) {
        ui.spacing_mut().item_spacing = egui::vec2(6.0, 6.0);

        self.ui_affichage(ui);

        ui.add_space(8.0);
        self.ui_pave(ui);

        ui.add_space(8.0);
        ui.separator();
        self.ui_historique(ui);
    }

    fn ui_affichage(&mut self, ui: &mut egui::Ui) {
        let texte = self.controleur.entree();

        egui::Frame::group(ui.style())
            .fill(ui.visuals().extreme_bg_color)
            .show(ui, |ui| {
                ui.set_min_width(ui.available_width());
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.add(
                        egui::Label::new(egui::RichText::new(texte).monospace().size(28.0))
                            .truncate(),
                    );
                });
            });

        // Pas de spinner : juste une ligne discrète tant qu’une réponse manque.
        if self.evaluation_en_cours() {
            ui.small("évaluation en cours…");
        } else {
            ui.small(" ");
        }
    }

    fn ui_pave(&mut self, ui: &mut egui::Ui) {
        #[cfg(test)]
        self.zones_pave.clear();

        egui::Grid::new("pave_calculatrice")
            .num_columns(4)
            .spacing([6.0, 6.0])
            .show(ui, |ui| {
                for rangee in PAVE.iter() {
                    for bouton in rangee.iter().copied() {
                        self.ui_bouton(ui, bouton);
                    }
                    ui.end_row();
                }
            });
    }

    fn ui_bouton(&mut self, ui: &mut egui::Ui, bouton: Bouton) {
        let mut resp = ui.add_sized(TAILLE_BOUTON, egui::Button::new(bouton.libelle()));
        if let Some(tip) = bouton.infobulle() {
            resp = resp.on_hover_text(tip);
        }
        #[cfg(test)]
        self.zones_pave.push((bouton, resp.rect));

        if resp.clicked() {
            self.agir(bouton.action());
        }
    }

    fn ui_historique(&mut self, ui: &mut egui::Ui) {
        egui::CollapsingHeader::new("Historique")
            .default_open(false)
            .show(ui, |ui| {
                if self.historique.is_empty() {
                    ui.weak("(vide)");
                    return;
                }

                egui::ScrollArea::vertical()
                    .max_height(160.0)
                    .stick_to_bottom(true)
                    .show(ui, |ui| {
                        for e in self.historique.iter() {
                            ui.monospace(format!("{} = {}", e.expression, e.resultat));
                        }
                    });

                if ui.small_button("Vider").clicked() {
                    self.effacer_historique();
                }
            });
    }
}
