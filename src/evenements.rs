//! src/evenements.rs
//!
//! Normalisation des entrées : touches clavier + boutons -> `Action`.
//!
//! Règle : chaque touche produit AU PLUS une action (une seule table de
//! correspondance, pas de double déclenchement).

use eframe::egui;

/// Intention utilisateur normalisée (consommée immédiatement par le contrôleur).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    Ajouter(char),
    Evaluer,
    Effacer,
    Retour,
}

/* ------------------------ Source A : clavier ------------------------ */

/// Traduit une identité de touche (style DOM : "Enter", "7", "ArrowLeft"…) en action.
///
/// - Enter / =        -> Evaluer
/// - Delete           -> Effacer
/// - Backspace        -> Retour
/// - 1 seul caractère -> Ajouter (chiffres, opérateurs, mais aussi lettres : pas de filtre)
/// - nom long         -> rien (Shift, ArrowLeft, …)
pub fn action_pour_touche(cle: &str) -> Option<Action> {
    match cle {
        "Enter" | "=" => Some(Action::Evaluer),
        "Delete" => Some(Action::Effacer),
        "Backspace" => Some(Action::Retour),
        _ => {
            let mut it = cle.chars();
            match (it.next(), it.next()) {
                (Some(c), None) => Some(Action::Ajouter(c)),
                _ => None,
            }
        }
    }
}

/// Convertit les événements egui d’une frame en identités de touches.
///
/// - `Event::Text` : un caractère = une touche (c’est la seule source des caractères)
/// - `Event::Key`  : seulement Enter / Delete / Backspace (pas de texte associé)
///
/// Les autres touches nommées sont ignorées ici : si elles tapent un caractère,
/// il arrive déjà par `Event::Text` (sinon on doublerait la saisie).
pub fn touches_depuis_evenements(evenements: &[egui::Event]) -> Vec<String> {
    let mut out = Vec::new();
    for ev in evenements {
        match ev {
            egui::Event::Text(texte) => {
                out.extend(texte.chars().map(String::from));
            }
            egui::Event::Key {
                key, pressed: true, ..
            } => {
                let nom = match key {
                    egui::Key::Enter => "Enter",
                    egui::Key::Delete => "Delete",
                    egui::Key::Backspace => "Backspace",
                    _ => continue,
                };
                out.push(nom.to_string());
            }
            _ => {}
        }
    }
    out
}

/// Raccourci : événements egui -> actions.
pub fn actions_clavier(evenements: &[egui::Event]) -> Vec<Action> {
    touches_depuis_evenements(evenements)
        .iter()
        .filter_map(|cle| action_pour_touche(cle))
        .collect()
}

/* ------------------------ Source B : boutons ------------------------ */

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Bouton {
    /// Bouton « valeur » (chiffre, opérateur, point, parenthèse)
    Valeur(char),
    Egal,
    Effacer,
    Retour,
}

impl Bouton {
    /// Même effet que la touche équivalente.
    pub fn action(self) -> Action {
        match self {
            Bouton::Valeur(c) => Action::Ajouter(c),
            Bouton::Egal => Action::Evaluer,
            Bouton::Effacer => Action::Effacer,
            Bouton::Retour => Action::Retour,
        }
    }

    pub fn libelle(self) -> String {
        match self {
            Bouton::Valeur(c) => c.to_string(),
            Bouton::Egal => "=".to_string(),
            Bouton::Effacer => "Suppr".to_string(),
            Bouton::Retour => "⌫".to_string(),
        }
    }

    pub fn infobulle(self) -> Option<&'static str> {
        match self {
            Bouton::Egal => Some("Évaluer (Entrée ou =)"),
            Bouton::Effacer => Some("Tout effacer (Suppr)"),
            Bouton::Retour => Some("Effacer le dernier caractère (Retour arrière)"),
            Bouton::Valeur(_) => None,
        }
    }
}

use Bouton::{Egal, Effacer, Retour, Valeur};

/// Pavé (4 colonnes).
pub const PAVE: [[Bouton; 4]; 5] = [
    [Valeur('('), Valeur(')'), Effacer, Retour],
    [Valeur('7'), Valeur('8'), Valeur('9'), Valeur('/')],
    [Valeur('4'), Valeur('5'), Valeur('6'), Valeur('*')],
    [Valeur('1'), Valeur('2'), Valeur('3'), Valeur('-')],
    [Valeur('0'), Valeur('.'), Egal, Valeur('+')],
];

#[cfg(test)]
mod tests {
    use super::*;

    fn touche(key: egui::Key, pressed: bool) -> egui::Event {
        egui::Event::Key {
            key,
            physical_key: None,
            pressed,
            repeat: false,
            modifiers: egui::Modifiers::NONE,
        }
    }

    #[test]
    fn touches_nommees() {
        assert_eq!(action_pour_touche("Enter"), Some(Action::Evaluer));
        assert_eq!(action_pour_touche("="), Some(Action::Evaluer));
        assert_eq!(action_pour_touche("Delete"), Some(Action::Effacer));
        assert_eq!(action_pour_touche("Backspace"), Some(Action::Retour));
    }

    #[test]
    fn chiffres_et_operateurs() {
        for c in "0123456789+-*/.".chars() {
            assert_eq!(
                action_pour_touche(&c.to_string()),
                Some(Action::Ajouter(c)),
                "touche {c:?}"
            );
        }
    }

    #[test]
    fn autre_caractere_seul_est_ajoute() {
        assert_eq!(action_pour_touche("a"), Some(Action::Ajouter('a')));
        assert_eq!(action_pour_touche("π"), Some(Action::Ajouter('π')));
        assert_eq!(action_pour_touche(" "), Some(Action::Ajouter(' ')));
    }

    #[test]
    fn noms_longs_ignores() {
        for cle in ["Shift", "ArrowLeft", "Escape", "F5", ""] {
            assert_eq!(action_pour_touche(cle), None, "touche {cle:?}");
        }
    }

    #[test]
    fn texte_egui_une_action_par_caractere() {
        let evs = vec![egui::Event::Text("5+".into()), egui::Event::Text("*".into())];
        assert_eq!(
            actions_clavier(&evs),
            vec![
                Action::Ajouter('5'),
                Action::Ajouter('+'),
                Action::Ajouter('*'),
            ]
        );
    }

    #[test]
    fn touche_egui_relachee_ignoree() {
        let evs = vec![touche(egui::Key::Enter, false)];
        assert!(actions_clavier(&evs).is_empty());
    }

    #[test]
    fn pas_de_double_saisie() {
        // Une frappe de "7" : egui émet Key(Num7) + Text("7")
        let evs = vec![touche(egui::Key::Num7, true), egui::Event::Text("7".into())];
        assert_eq!(actions_clavier(&evs), vec![Action::Ajouter('7')]);

        // "=" : Key(Equals) + Text("=") -> une seule évaluation
        let evs = vec![touche(egui::Key::Equals, true), egui::Event::Text("=".into())];
        assert_eq!(actions_clavier(&evs), vec![Action::Evaluer]);
    }

    #[test]
    fn touches_egui_de_controle() {
        let evs = vec![
            touche(egui::Key::Enter, true),
            touche(egui::Key::Delete, true),
            touche(egui::Key::Backspace, true),
            touche(egui::Key::ArrowLeft, true),
        ];
        assert_eq!(
            actions_clavier(&evs),
            vec![Action::Evaluer, Action::Effacer, Action::Retour]
        );
    }

    #[test]
    fn boutons_equivalents_aux_touches() {
        assert_eq!(Bouton::Egal.action(), action_pour_touche("Enter").unwrap());
        assert_eq!(Bouton::Effacer.action(), action_pour_touche("Delete").unwrap());
        assert_eq!(Bouton::Retour.action(), action_pour_touche("Backspace").unwrap());
        assert_eq!(Bouton::Valeur('9').action(), action_pour_touche("9").unwrap());
    }

    #[test]
    fn pave_contient_chaque_commande_une_fois() {
        let tous: Vec<Bouton> = PAVE.iter().flatten().copied().collect();
        for b in [Bouton::Egal, Bouton::Effacer, Bouton::Retour] {
            assert_eq!(tous.iter().filter(|x| **x == b).count(), 1, "{b:?}");
        }
        for c in "0123456789.+-*/".chars() {
            assert!(tous.contains(&Bouton::Valeur(c)), "bouton {c:?} manquant");
        }
    }
}
