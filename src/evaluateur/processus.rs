//! Client vers le processus hôte.
//!
//! - lancé à la première requête (et relancé s’il est mort)
//! - une requête à la fois sur le tube (mutex tokio)
//! - tué quand le client est détruit (kill_on_drop)

use std::process::Stdio;

use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::process::{Child, ChildStdin, ChildStdout, Command};
use tokio::sync::Mutex;

use super::protocole::{decoder_reponse, encoder_requete};
use super::{ErreurEvaluateur, Evaluateur};

struct Canal {
    enfant: Child,
    entree: ChildStdin,
    sortie: BufReader<ChildStdout>,
}

pub struct EvaluateurProcessus {
    commande: String,
    args: Vec<String>,
    canal: Mutex<Option<Canal>>,
}

impl EvaluateurProcessus {
    pub fn new(commande: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            commande: commande.into(),
            args,
            canal: Mutex::new(None),
        }
    }

    pub fn commande(&self) -> &str {
        &self.commande
    }

    fn lancer(&self) -> Result<Canal, ErreurEvaluateur> {
        log::info!("lancement de l’hôte: {} {:?}", self.commande, self.args);

        let mut enfant = Command::new(&self.commande)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| ErreurEvaluateur::Lancement {
                commande: self.commande.clone(),
                source,
            })?;

        let entree = enfant
            .stdin
            .take()
            .ok_or_else(|| ErreurEvaluateur::Protocole("stdin de l’hôte indisponible".into()))?;
        let sortie = enfant
            .stdout
            .take()
            .ok_or_else(|| ErreurEvaluateur::Protocole("stdout de l’hôte indisponible".into()))?;

        Ok(Canal {
            enfant,
            entree,
            sortie: BufReader::new(sortie),
        })
    }

    async fn echanger(canal: &mut Canal, id: u64, inp: &str) -> Result<String, ErreurEvaluateur> {
        let mut ligne = encoder_requete(id, inp)?;
        ligne.push('\n');
        canal.entree.write_all(ligne.as_bytes()).await?;
        canal.entree.flush().await?;

        let mut recu = String::new();
        if canal.sortie.read_line(&mut recu).await? == 0 {
            return Err(ErreurEvaluateur::HoteTermine);
        }
        log::trace!("hôte <- {}", recu.trim_end());

        decoder_reponse(&recu, id)
    }
}

#[async_trait]
impl Evaluateur for EvaluateurProcessus {
    async fn parse_and_eval(&self, id: u64, inp: &str) -> Result<String, ErreurEvaluateur> {
        let mut garde = self.canal.lock().await;

        // Hôte mort depuis la dernière fois ? On repart d’un processus neuf.
        let fin = match garde.as_mut() {
            Some(canal) => canal.enfant.try_wait().ok().flatten(),
            None => None,
        };
        if let Some(statut) = fin {
            log::warn!("l’hôte s’est terminé ({statut}), relance");
            *garde = None;
        }

        if garde.is_none() {
            *garde = Some(self.lancer()?);
        }

        let resultat = match garde.as_mut() {
            Some(canal) => Self::echanger(canal, id, inp).await,
            None => Err(ErreurEvaluateur::HoteTermine),
        };

        // Tube dans un état inconnu après une erreur : on le jette.
        if resultat.is_err() {
            *garde = None;
        }
        resultat
    }
}
