//! src/app/etat.rs
//!
//! État UI (sans vue).
//!
//! Rôle : relier le contrôleur de saisie au service d’évaluation et tenir
//! l’historique. Aucune arithmétique ici (elle vit dans le processus hôte).
//!
//! Contrats :
//! - Le contrôleur n’est touché que depuis la boucle UI.
//! - Une réponse est toujours du texte : pas de branche succès/erreur.

use std::collections::{HashMap, VecDeque};

use calculatrice_hote::evaluateur::ServiceEvaluation;
use calculatrice_hote::{Action, Config, Controleur, Reponse};

/// Une évaluation terminée (expression envoyée -> texte reçu).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EntreeHistorique {
    pub expression: String,
    pub resultat: String,
}

pub struct AppCalc {
    pub controleur: Controleur,
    service: ServiceEvaluation,

    // id de requête -> expression envoyée (pour l’historique)
    en_vol: HashMap<u64, String>,

    pub historique: VecDeque<EntreeHistorique>,
    historique_max: usize,

    // Zones des boutons du pavé à la dernière frame (tests de la vue)
    #[cfg(test)]
    pub(crate) zones_pave: Vec<(calculatrice_hote::evenements::Bouton, eframe::egui::Rect)>,
}

impl AppCalc {
    pub fn new(service: ServiceEvaluation, config: &Config) -> Self {
        Self {
            controleur: Controleur::new()
                .avec_ignorer_perimees(config.comportement.ignorer_reponses_perimees),
            service,
            en_vol: HashMap::new(),
            historique: VecDeque::new(),
            historique_max: config.comportement.historique_max,
            #[cfg(test)]
            zones_pave: Vec::new(),
        }
    }

    /// Applique une action (clavier ou bouton) ; `Evaluer` part vers l’hôte.
    pub fn agir(&mut self, action: Action) {
        let Some(requete) = self.controleur.traiter(action) else {
            return;
        };

        self.en_vol.insert(requete.id, requete.inp.clone());
        if let Err(e) = self.service.soumettre(requete) {
            // Même comportement qu’un hôte muet : l’entrée ne change pas.
            log::error!("requête non envoyée: {e}");
        }
    }

    /// Vide les réponses arrivées et les applique dans l’ordre d’arrivée.
    pub fn recevoir_reponses(&mut self) {
        for reponse in self.service.recevoir() {
            self.appliquer(reponse);
        }

        // Plus rien en vol : les requêtes restantes ont échoué côté transport.
        if !self.en_vol.is_empty() && self.service.en_attente() == 0 {
            for reponse in self.service.recevoir() {
                self.appliquer(reponse);
            }
            self.en_vol.clear();
        }
    }

    fn appliquer(&mut self, reponse: Reponse) {
        let expression = self.en_vol.remove(&reponse.id);
        let resultat = reponse.texte.clone();

        if !self.controleur.appliquer_reponse(reponse) {
            return;
        }

        if let Some(expression) = expression {
            self.noter(expression, resultat);
        }
    }

    fn noter(&mut self, expression: String, resultat: String) {
        if self.historique_max == 0 {
            return;
        }
        self.historique.push_back(EntreeHistorique {
            expression,
            resultat,
        });
        while self.historique.len() > self.historique_max {
            self.historique.pop_front();
        }
    }

    pub fn effacer_historique(&mut self) {
        self.historique.clear();
    }

    pub fn evaluation_en_cours(&self) -> bool {
        self.service.en_attente() > 0
    }
}
