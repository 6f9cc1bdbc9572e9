//! Évaluateur (collaborateur externe)
//!
//! Organisation interne :
//! - protocole.rs : lignes JSON échangées avec l’hôte
//! - processus.rs : client vers le processus hôte (stdin/stdout)
//! - service.rs   : pont UI synchrone <-> runtime tokio
//!
//! L’arithmétique n’est PAS ici : elle vit dans le processus hôte.

pub mod processus;
pub mod protocole;
pub mod service;

use async_trait::async_trait;
use thiserror::Error;

pub use processus::EvaluateurProcessus;
pub use service::ServiceEvaluation;

/// Un seul appel : on envoie une chaîne, on reçoit une chaîne.
///
/// `id` est celui de la `Requete` du contrôleur ; il est repris tel quel sur le
/// tube, donc journaux et échanges portent le même numéro.
///
/// `Ok` porte le texte de l’hôte, que ce soit une valeur ou un message d’erreur.
/// `Err` ne signale qu’un échec de transport.
#[async_trait]
pub trait Evaluateur: Send + Sync {
    async fn parse_and_eval(&self, id: u64, inp: &str) -> Result<String, ErreurEvaluateur>;
}

/// Échecs de transport (jamais affichés dans l’entrée).
#[derive(Debug, Error)]
pub enum ErreurEvaluateur {
    #[error("impossible de lancer l’hôte `{commande}`: {source}")]
    Lancement {
        commande: String,
        #[source]
        source: std::io::Error,
    },

    #[error("erreur d’entrée/sortie avec l’hôte: {0}")]
    Io(#[from] std::io::Error),

    #[error("protocole: {0}")]
    Protocole(String),

    #[error("l’hôte a fermé sa sortie")]
    HoteTermine,

    #[error("service d’évaluation arrêté")]
    ServiceArrete,
}
