//! Format d’échange avec l’hôte : une ligne JSON par message.
//!
//! Requête :  {"id":7,"cmd":"parse_and_eval","args":{"inp":"1+2"}}
//! Réponse :  {"id":7,"ret":3.0}   ou   {"id":7,"err":"message"}
//!
//! Les deux formes de réponse deviennent du texte par le même chemin.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::ErreurEvaluateur;

/// Seule commande connue de l’hôte.
pub const COMMANDE: &str = "parse_and_eval";

#[derive(Debug, Serialize)]
pub struct MessageRequete<'a> {
    pub id: u64,
    pub cmd: &'a str,
    pub args: Arguments<'a>,
}

#[derive(Debug, Serialize)]
pub struct Arguments<'a> {
    pub inp: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct MessageReponse {
    pub id: u64,
    #[serde(flatten)]
    pub corps: Corps,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Corps {
    Ret(Value),
    Err(Value),
}

/// Sérialise une requête (sans le '\n' final).
pub fn encoder_requete(id: u64, inp: &str) -> Result<String, ErreurEvaluateur> {
    let msg = MessageRequete {
        id,
        cmd: COMMANDE,
        args: Arguments { inp },
    };
    serde_json::to_string(&msg).map_err(|e| ErreurEvaluateur::Protocole(e.to_string()))
}

/// Décode une ligne de réponse et vérifie qu’elle correspond à la requête `id`.
pub fn decoder_reponse(ligne: &str, id: u64) -> Result<String, ErreurEvaluateur> {
    let msg: MessageReponse = serde_json::from_str(ligne.trim())
        .map_err(|e| ErreurEvaluateur::Protocole(format!("réponse illisible: {e}")))?;

    if msg.id != id {
        return Err(ErreurEvaluateur::Protocole(format!(
            "id inattendu: {} (attendu {id})",
            msg.id
        )));
    }

    let valeur = match msg.corps {
        Corps::Ret(v) | Corps::Err(v) => v,
    };
    Ok(en_texte(valeur))
}

/// Chaîne JSON -> son contenu ; toute autre valeur -> son texte JSON.
fn en_texte(v: Value) -> String {
    match v {
        Value::String(s) => s,
        autre => autre.to_string(),
    }
}
