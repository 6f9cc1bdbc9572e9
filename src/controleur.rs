//! src/controleur.rs
//!
//! Contrôleur de saisie (sans vue, sans évaluation).
//!
//! Rôle : posséder le tampon affiché et le drapeau « post-résultat »,
//! appliquer les actions normalisées (clavier ou boutons).
//!
//! Contrats :
//! - Le tampon reflète exactement ce qui est visible.
//! - `post_resultat` est vrai seulement entre une évaluation et l’ajout suivant.
//! - Aucune validation de saisie ici : l’hôte décide de ce qui est valide.
//! - Aucune branche succès/erreur sur la réponse : c’est toujours du texte.

use crate::evenements::Action;

/// Requête d’évaluation produite par `evaluer()`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Requete {
    pub id: u64,
    pub inp: String,
}

/// Réponse de l’hôte, déjà convertie en texte.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Reponse {
    pub id: u64,
    pub texte: String,
}

#[derive(Clone, Debug, Default)]
pub struct Controleur {
    entree: String,
    post_resultat: bool,

    // Séquencement (ids monotones, à partir de 1)
    dernier_id: u64,
    dernier_applique: u64,
    ignorer_perimees: bool,
}

impl Controleur {
    pub fn new() -> Self {
        Self::default()
    }

    /// Variante « durcie » : une réponse plus ancienne que la dernière appliquée est ignorée.
    pub fn avec_ignorer_perimees(mut self, actif: bool) -> Self {
        self.ignorer_perimees = actif;
        self
    }

    pub fn entree(&self) -> &str {
        &self.entree
    }

    pub fn post_resultat(&self) -> bool {
        self.post_resultat
    }

    /* ------------------------ Point d’entrée unique ------------------------ */

    /// Applique une action. Seul `Evaluer` produit une requête.
    pub fn traiter(&mut self, action: Action) -> Option<Requete> {
        match action {
            Action::Ajouter(c) => {
                self.ajouter(c);
                None
            }
            Action::Evaluer => Some(self.evaluer()),
            Action::Effacer => {
                self.effacer();
                None
            }
            Action::Retour => {
                self.retour();
                None
            }
        }
    }

    /* ------------------------ Opérations ------------------------ */

    /// Ajout d’un caractère. Juste après un résultat, on repart d’une entrée vide.
    pub fn ajouter(&mut self, c: char) {
        if self.post_resultat {
            self.entree.clear();
            self.post_resultat = false;
        }
        self.entree.push(c);
    }

    /// Efface toute l’entrée (le drapeau n’est pas touché).
    pub fn effacer(&mut self) {
        self.entree.clear();
    }

    /// Retire le dernier caractère ; sans effet si l’entrée est vide.
    pub fn retour(&mut self) {
        self.entree.pop();
    }

    /// Émet une requête avec l’entrée telle quelle.
    ///
    /// Le drapeau passe à vrai tout de suite, avant la réponse : une saisie
    /// pendant l’évaluation est déjà traitée comme « après résultat ».
    pub fn evaluer(&mut self) -> Requete {
        self.post_resultat = true;
        self.dernier_id += 1;
        Requete {
            id: self.dernier_id,
            inp: self.entree.clone(),
        }
    }

    /// Remplace l’entrée par le texte de la réponse.
    ///
    /// Retourne `false` si la réponse a été ignorée (périmée, mode durci uniquement).
    pub fn appliquer_reponse(&mut self, reponse: Reponse) -> bool {
        if self.ignorer_perimees && reponse.id < self.dernier_applique {
            log::debug!(
                "réponse {} ignorée (déjà appliquée: {})",
                reponse.id,
                self.dernier_applique
            );
            return false;
        }

        self.dernier_applique = self.dernier_applique.max(reponse.id);
        self.entree = reponse.texte;
        true
    }
}
