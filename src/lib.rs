//! Calculatrice hôte — bibliothèque
//!
//! Tout ce qui ne dépend pas de la fenêtre : contrôleur de saisie, normalisation
//! des entrées, client de l’évaluateur, configuration. Le binaire (main.rs + app)
//! ne fait que brancher ces pièces sur eframe.

pub mod config;
pub mod controleur;
pub mod evaluateur;
pub mod evenements;

pub use config::Config;
pub use controleur::{Controleur, Reponse, Requete};
pub use evenements::Action;
