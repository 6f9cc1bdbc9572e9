//! Pont entre la boucle UI (synchrone) et le runtime tokio.
//!
//! - `soumettre` ne bloque jamais
//! - chaque requête est évaluée dans sa propre tâche (pas d’annulation)
//! - les réponses arrivent dans un canal que l’UI vide à chaque frame
//! - échec de transport : journalisé, aucune réponse (l’entrée ne bouge pas)

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{mpsc as std_mpsc, Arc};

use tokio::sync::mpsc;

use super::{ErreurEvaluateur, Evaluateur};
use crate::controleur::{Reponse, Requete};

/// Appelé après chaque réponse (ex. `egui::Context::request_repaint`).
pub type Notificateur = Arc<dyn Fn() + Send + Sync>;

pub struct ServiceEvaluation {
    requetes: mpsc::UnboundedSender<Requete>,
    reponses: std_mpsc::Receiver<Reponse>,
    en_cours: Arc<AtomicUsize>,
}

impl ServiceEvaluation {
    /// Démarre la tâche de fond sur le runtime donné.
    pub fn new(
        runtime_handle: &tokio::runtime::Handle,
        evaluateur: Arc<dyn Evaluateur>,
        notificateur: Option<Notificateur>,
    ) -> Self {
        let (requetes_tx, mut requetes_rx) = mpsc::unbounded_channel::<Requete>();
        let (reponses_tx, reponses_rx) = std_mpsc::channel::<Reponse>();
        let en_cours = Arc::new(AtomicUsize::new(0));

        let en_cours_tache = en_cours.clone();
        let handle = runtime_handle.clone();

        runtime_handle.spawn(async move {
            while let Some(requete) = requetes_rx.recv().await {
                log::debug!("évaluation #{}: {:?}", requete.id, requete.inp);

                let evaluateur = evaluateur.clone();
                let reponses_tx = reponses_tx.clone();
                let notificateur = notificateur.clone();
                let en_cours = en_cours_tache.clone();

                handle.spawn(async move {
                    match evaluateur.parse_and_eval(requete.id, &requete.inp).await {
                        Ok(texte) => {
                            log::debug!("réponse #{}: {:?}", requete.id, texte);
                            let reponse = Reponse {
                                id: requete.id,
                                texte,
                            };
                            if reponses_tx.send(reponse).is_err() {
                                log::debug!("réponse #{} perdue: UI fermée", requete.id);
                            }
                        }
                        Err(e) => {
                            log::error!("évaluation #{} échouée: {e}", requete.id);
                        }
                    }

                    en_cours.fetch_sub(1, Ordering::SeqCst);
                    if let Some(notifier) = notificateur {
                        notifier();
                    }
                });
            }
            log::debug!("service d’évaluation: canal fermé, arrêt");
        });

        Self {
            requetes: requetes_tx,
            reponses: reponses_rx,
            en_cours,
        }
    }

    /// Envoie une requête (non bloquant).
    pub fn soumettre(&self, requete: Requete) -> Result<(), ErreurEvaluateur> {
        self.en_cours.fetch_add(1, Ordering::SeqCst);
        self.requetes.send(requete).map_err(|_| {
            self.en_cours.fetch_sub(1, Ordering::SeqCst);
            ErreurEvaluateur::ServiceArrete
        })
    }

    /// Réponses arrivées depuis le dernier appel (ordre d’arrivée).
    pub fn recevoir(&self) -> Vec<Reponse> {
        self.reponses.try_iter().collect()
    }

    /// Nombre de requêtes sans réponse (ni échec) pour l’instant.
    pub fn en_attente(&self) -> usize {
        self.en_cours.load(Ordering::SeqCst)
    }
}
