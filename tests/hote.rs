//! Client + service contre un vrai processus hôte (script shell).

#![cfg(unix)]

use std::path::PathBuf;
use std::sync::Arc;

use tempfile::TempDir;
use tokio::time::{sleep, Duration};

use calculatrice_hote::evaluateur::{
    ErreurEvaluateur, Evaluateur, EvaluateurProcessus, ServiceEvaluation,
};
use calculatrice_hote::{Action, Controleur};

/// Hôte écho : renvoie `inp` tel quel, avec le même id.
const HOTE_ECHO: &str = r#"
while IFS= read -r ligne; do
    id=$(printf '%s' "$ligne" | sed 's/.*"id":\([0-9]*\).*/\1/')
    inp=$(printf '%s' "$ligne" | sed 's/.*"inp":"\(.*\)"}}$/\1/')
    printf '{"id":%s,"ret":"%s"}\n' "$id" "$inp"
done
"#;

/// Hôte qui répond toujours par une erreur.
const HOTE_ERREUR: &str = r#"
while IFS= read -r ligne; do
    id=$(printf '%s' "$ligne" | sed 's/.*"id":\([0-9]*\).*/\1/')
    printf '{"id":%s,"err":"invalid float literal"}\n' "$id"
done
"#;

/// Hôte qui répond une fois puis se termine.
const HOTE_UNE_FOIS: &str = r#"
IFS= read -r ligne
id=$(printf '%s' "$ligne" | sed 's/.*"id":\([0-9]*\).*/\1/')
printf '{"id":%s,"ret":"une"}\n' "$id"
"#;

/// Hôte qui renvoie l’id reçu comme résultat.
const HOTE_ID: &str = r#"
while IFS= read -r ligne; do
    id=$(printf '%s' "$ligne" | sed 's/.*"id":\([0-9]*\).*/\1/')
    printf '{"id":%s,"ret":"%s"}\n' "$id" "$id"
done
"#;

fn script(dir: &TempDir, nom: &str, contenu: &str) -> PathBuf {
    let p = dir.path().join(nom);
    std::fs::write(&p, contenu).unwrap();
    p
}

fn hote(dir: &TempDir, contenu: &str) -> EvaluateurProcessus {
    let p = script(dir, "hote.sh", contenu);
    EvaluateurProcessus::new("sh", vec![p.display().to_string()])
}

#[tokio::test(flavor = "multi_thread")]
async fn echo_plusieurs_requetes_meme_processus() {
    let dir = TempDir::new().unwrap();
    let ev = hote(&dir, HOTE_ECHO);

    assert_eq!(ev.parse_and_eval(1, "123").await.unwrap(), "123");
    assert_eq!(ev.parse_and_eval(2, "5+").await.unwrap(), "5+");
    assert_eq!(ev.parse_and_eval(3, "").await.unwrap(), "");
}

#[tokio::test(flavor = "multi_thread")]
async fn erreur_de_l_hote_est_du_texte() {
    let dir = TempDir::new().unwrap();
    let ev = hote(&dir, HOTE_ERREUR);

    assert_eq!(
        ev.parse_and_eval(1, "1+").await.unwrap(),
        "invalid float literal"
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn commande_introuvable() {
    let ev = EvaluateurProcessus::new("/chemin/qui/n/existe/pas", Vec::new());
    let err = ev.parse_and_eval(1, "1").await.unwrap_err();
    assert!(
        matches!(err, ErreurEvaluateur::Lancement { .. }),
        "erreur inattendue: {err:?}"
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn hote_relance_apres_sa_mort() {
    let dir = TempDir::new().unwrap();
    let ev = hote(&dir, HOTE_UNE_FOIS);

    assert_eq!(ev.parse_and_eval(1, "1").await.unwrap(), "une");

    // Selon le moment où la fin de l’hôte est vue, une requête peut échouer ;
    // la suivante doit repartir sur un processus neuf.
    let r = match ev.parse_and_eval(2, "2").await {
        Ok(s) => s,
        Err(_) => ev.parse_and_eval(2, "2").await.unwrap(),
    };
    assert_eq!(r, "une");
}

#[tokio::test(flavor = "multi_thread")]
async fn scenario_complet_avec_le_controleur() {
    let dir = TempDir::new().unwrap();
    let ev = Arc::new(hote(&dir, HOTE_ECHO));
    let service = ServiceEvaluation::new(&tokio::runtime::Handle::current(), ev, None);
    let mut c = Controleur::new();

    for ch in "12".chars() {
        c.traiter(Action::Ajouter(ch));
    }
    c.traiter(Action::Ajouter('3'));
    assert_eq!(c.entree(), "123");

    let requete = c.traiter(Action::Evaluer).expect("requête");
    service.soumettre(requete).unwrap();

    let mut reponses = Vec::new();
    for _ in 0..100 {
        reponses.extend(service.recevoir());
        if !reponses.is_empty() {
            break;
        }
        sleep(Duration::from_millis(20)).await;
    }
    assert_eq!(reponses.len(), 1);
    for r in reponses {
        c.appliquer_reponse(r);
    }
    assert_eq!(c.entree(), "123");

    c.traiter(Action::Ajouter('4'));
    assert_eq!(c.entree(), "4");
}

#[tokio::test(flavor = "multi_thread")]
async fn id_de_la_requete_repris_sur_le_tube() {
    let dir = TempDir::new().unwrap();
    let ev = hote(&dir, HOTE_ID);

    assert_eq!(ev.parse_and_eval(42, "x").await.unwrap(), "42");
    assert_eq!(ev.parse_and_eval(7, "y").await.unwrap(), "7");

    // Même numéro côté contrôleur et côté hôte
    let mut c = Controleur::new();
    c.traiter(Action::Ajouter('1'));
    let requete = c.traiter(Action::Evaluer).unwrap();
    let texte = ev.parse_and_eval(requete.id, &requete.inp).await.unwrap();
    assert_eq!(texte, requete.id.to_string());
}
