//! src/config.rs
//!
//! Configuration (fichier TOML), par défaut `~/.config/calculatrice/config.toml`.
//!
//! Fichier absent => valeurs par défaut. TOML invalide => erreur.
//! Valeurs hors bornes => ramenées dans les bornes (avec avertissement).
//!
//! ```toml
//! [evaluateur]
//! commande = "calculatrice-hote"
//! args = []
//!
//! [fenetre]
//! largeur = 320.0
//! hauteur = 480.0
//!
//! [comportement]
//! ignorer_reponses_perimees = false
//! historique_max = 50
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

/// Bornes de la fenêtre (px).
const FENETRE_MIN: f32 = 200.0;
const FENETRE_MAX: f32 = 2000.0;

/// Garde-fou : taille de l’historique.
const HISTORIQUE_MAX: usize = 1000;

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub evaluateur: EvaluateurConfig,

    #[serde(default)]
    pub fenetre: FenetreConfig,

    #[serde(default)]
    pub comportement: ComportementConfig,
}

/// Processus hôte qui implémente `parse_and_eval`.
#[derive(Debug, Serialize, Deserialize)]
pub struct EvaluateurConfig {
    #[serde(default = "defaut_commande")]
    pub commande: String,

    #[serde(default)]
    pub args: Vec<String>,
}

impl Default for EvaluateurConfig {
    fn default() -> Self {
        Self {
            commande: defaut_commande(),
            args: Vec::new(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct FenetreConfig {
    #[serde(default = "defaut_largeur")]
    pub largeur: f32,

    #[serde(default = "defaut_hauteur")]
    pub hauteur: f32,
}

impl Default for FenetreConfig {
    fn default() -> Self {
        Self {
            largeur: defaut_largeur(),
            hauteur: defaut_hauteur(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ComportementConfig {
    /// Ignore une réponse plus ancienne que la dernière affichée.
    #[serde(default)]
    pub ignorer_reponses_perimees: bool,

    /// Nombre d’entrées gardées dans l’historique (0 = pas d’historique).
    #[serde(default = "defaut_historique_max")]
    pub historique_max: usize,
}

impl Default for ComportementConfig {
    fn default() -> Self {
        Self {
            ignorer_reponses_perimees: false,
            historique_max: defaut_historique_max(),
        }
    }
}

fn defaut_commande() -> String {
    "calculatrice-hote".to_string()
}

fn defaut_largeur() -> f32 {
    320.0
}

fn defaut_hauteur() -> f32 {
    480.0
}

fn defaut_historique_max() -> usize {
    50
}

impl Config {
    /// Chemin par défaut : `$XDG_CONFIG_HOME/calculatrice/config.toml`.
    pub fn chemin_par_defaut() -> Result<PathBuf> {
        let dossier = dirs::config_dir()
            .context("Répertoire de configuration introuvable")?
            .join("calculatrice");
        Ok(dossier.join("config.toml"))
    }

    /// Charge la configuration (`chemin` explicite, sinon le chemin par défaut).
    pub fn charger(chemin: Option<&Path>) -> Result<Self> {
        let chemin = match chemin {
            Some(p) => p.to_path_buf(),
            None => Self::chemin_par_defaut()?,
        };

        if !chemin.exists() {
            info!("Pas de fichier de configuration, valeurs par défaut");
            debug!("Attendu: {}", chemin.display());
            return Ok(Self::default());
        }

        let texte = fs::read_to_string(&chemin)
            .with_context(|| format!("Lecture impossible: {}", chemin.display()))?;

        let mut config: Config = toml::from_str(&texte)
            .with_context(|| format!("Configuration invalide: {}", chemin.display()))?;

        config.valider_et_borner();

        info!("Configuration chargée depuis {}", chemin.display());
        debug!("Config: {:?}", config);
        Ok(config)
    }

    /// Ramène les valeurs dans leurs bornes.
    fn valider_et_borner(&mut self) {
        for (nom, v) in [
            ("largeur", &mut self.fenetre.largeur),
            ("hauteur", &mut self.fenetre.hauteur),
        ] {
            if !(FENETRE_MIN..=FENETRE_MAX).contains(&*v) {
                warn!(
                    "{nom} {:.0} hors bornes, ramenée dans {FENETRE_MIN}-{FENETRE_MAX}",
                    *v
                );
                *v = v.clamp(FENETRE_MIN, FENETRE_MAX);
            }
        }

        if self.comportement.historique_max > HISTORIQUE_MAX {
            warn!(
                "historique_max {} trop grand, ramené à {HISTORIQUE_MAX}",
                self.comportement.historique_max
            );
            self.comportement.historique_max = HISTORIQUE_MAX;
        }

        if self.evaluateur.commande.trim().is_empty() {
            warn!("evaluateur.commande vide, valeur par défaut utilisée");
            self.evaluateur.commande = defaut_commande();
        }
    }

    /// Configuration résolue, en TOML (pour `--afficher-config`).
    pub fn en_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Sérialisation de la configuration")
    }
}
