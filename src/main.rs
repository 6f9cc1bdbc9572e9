// src/main.rs
//
// Calculatrice hôte — point d’entrée
// ----------------------------------
// - CLI (clap) + journal (env_logger, RUST_LOG)
// - Configuration TOML
// - Runtime tokio pour le service d’évaluation
// - Fenêtre native eframe

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{ArgAction, Parser};
use eframe::egui;

use calculatrice_hote::evaluateur::service::Notificateur;
use calculatrice_hote::evaluateur::{EvaluateurProcessus, ServiceEvaluation};
use calculatrice_hote::Config;

mod app;

use app::AppCalc;

const TITRE_APP: &str = "Calculatrice";

#[derive(Parser, Debug)]
#[command(name = "calculatrice_hote")]
#[command(version, about = "Calculatrice de bureau (évaluation déléguée à un processus hôte)")]
struct Cli {
    /// Fichier de configuration (défaut : ~/.config/calculatrice/config.toml)
    #[arg(long, value_name = "FICHIER")]
    config: Option<PathBuf>,

    /// Commande du processus hôte (remplace evaluateur.commande)
    #[arg(long, value_name = "COMMANDE")]
    hote: Option<String>,

    /// Affiche la configuration résolue et quitte
    #[arg(long, action = ArgAction::SetTrue)]
    afficher_config: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    let mut config = Config::charger(cli.config.as_deref())?;
    if let Some(hote) = cli.hote {
        config.evaluateur.commande = hote;
    }

    if cli.afficher_config {
        print!("{}", config.en_toml()?);
        return Ok(());
    }

    let runtime = tokio::runtime::Runtime::new().context("Création du runtime tokio")?;

    let evaluateur = Arc::new(EvaluateurProcessus::new(
        config.evaluateur.commande.clone(),
        config.evaluateur.args.clone(),
    ));
    log::info!("Évaluateur: {}", evaluateur.commande());

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(TITRE_APP)
            .with_inner_size([config.fenetre.largeur, config.fenetre.hauteur])
            .with_min_inner_size([260.0, 380.0]),
        ..Default::default()
    };

    let handle = runtime.handle().clone();
    eframe::run_native(
        TITRE_APP,
        options,
        Box::new(move |cc| {
            // Réveille la boucle UI quand une réponse arrive.
            let ctx = cc.egui_ctx.clone();
            let notificateur: Notificateur = Arc::new(move || ctx.request_repaint());

            let service = ServiceEvaluation::new(&handle, evaluateur, Some(notificateur));
            Ok(Box::new(AppCalc::new(service, &config)))
        }),
    )
    .map_err(|e| anyhow::anyhow!("eframe: {e}"))?;

    log::info!("Fenêtre fermée");
    Ok(())
}
