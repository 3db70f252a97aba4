//! 内置替换规则表
//!
//! 规则按声明顺序求值，顺序本身就是规则的一部分

use crate::services::replacement_selector::{LevelBuckets, Predicate, Rule};

fn q(keyword: &str) -> Predicate {
    Predicate::question(keyword)
}

fn comp(keyword: &str) -> Predicate {
    Predicate::competence(keyword)
}

fn all<const N: usize>(ps: [Predicate; N]) -> Predicate {
    Predicate::All(ps.into())
}

fn any<const N: usize>(ps: [Predicate; N]) -> Predicate {
    Predicate::Any(ps.into())
}

/// 内置的关键词规则
pub fn default_rules() -> Vec<Rule> {
    vec![
        Rule::new(
            "recherche_mots_cles",
            any([all([q("mot"), q("clé")]), q("recette")]),
            &[
                "Dans la barre d'adresse du navigateur",
                "Dans l'explorateur de fichiers",
                "Dans une application de messagerie",
                "Dans le menu Démarrer",
            ],
        ),
        Rule::new(
            "validation_saisie",
            all([q("tape"), any([comp("entrée"), comp("recherche")])]),
            &[
                "Cliquer sur le bouton 'Accueil' du navigateur",
                "Ouvrir un nouvel onglet",
                "Attendre l'affichage automatique des résultats",
                "Sélectionner tout le texte saisi",
            ],
        ),
        Rule::new(
            "navigation_retour",
            any([q("retour"), q("précédent")]),
            &[
                "Actualiser la page avec F5",
                "Ouvrir un nouvel onglet",
                "Fermer l'onglet actuel",
                "Cliquer sur la flèche 'Suivant'",
            ],
        ),
        Rule::new(
            "enregistrement",
            any([q("conserver"), q("enregistrer")]),
            &[
                "Copier le contenu dans le presse-papiers",
                "Créer un raccourci sur le Bureau",
                "Imprimer le document en PDF",
                "Envoyer le document par email",
            ],
        ),
        Rule::new(
            "organisation_fichiers",
            any([q("rangés"), q("retrouver")]),
            &[
                "Dans la barre des tâches",
                "Dans le navigateur web",
                "Dans les applications récentes",
                "Dans la corbeille",
            ],
        ),
        Rule::new(
            "recherche_fichiers",
            any([q("trouvez plus"), q("quel outil")]),
            &[
                "L'explorateur de fichiers uniquement",
                "La liste des fichiers récents",
                "Le gestionnaire de tâches",
                "Les propriétés du système",
            ],
        ),
        Rule::new(
            "partage_photo",
            all([q("photo"), q("ami")]),
            &[
                "Le Bluetooth",
                "Un email",
                "Un câble réseau Ethernet",
                "Le partage de connexion Wi-Fi",
            ],
        ),
        Rule::new(
            "pieces_jointes",
            any([q("accroche"), q("email")]),
            &[
                "Un fichier en brouillon",
                "Un lien hypertexte",
                "Une signature électronique",
                "Un objet du message",
            ],
        ),
        Rule::new(
            "partage_email",
            all([q("partagez"), q("email")]),
            &[
                "Le fichier est compressé automatiquement",
                "Le fichier est converti en PDF",
                "Le fichier est stocké sur un cloud",
                "Le fichier est transféré puis supprimé",
            ],
        ),
        Rule::new(
            "barre_espace",
            all([q("espace"), q("mots")]),
            &[
                "La touche Tabulation (Tab)",
                "La touche Alt Gr",
                "La touche Windows",
                "La touche de verrouillage (Caps Lock)",
            ],
        ),
        Rule::new(
            "majuscule",
            q("majuscule"),
            &[
                "La touche Alt",
                "La touche Ctrl",
                "La touche de verrouillage (Caps Lock)",
                "La touche Windows",
            ],
        ),
        Rule::new(
            "effacement",
            any([q("effacer"), comp("backspace")]),
            &[
                "La touche Suppr (Delete)",
                "La touche Entrée",
                "La touche de verrouillage (Caps Lock)",
                "La touche Alt Gr",
            ],
        ),
        Rule::new(
            "icone_email",
            all([q("logo"), q("email")]),
            &[
                "Une icône de bulle de discussion",
                "Une icône de cloche (notifications)",
                "Une icône de calendrier",
                "Une icône de liste de tâches",
            ],
        ),
        Rule::new(
            "messagerie_instantanee",
            any([q("whatsapp"), q("messenger")]),
            &[
                "À partager des photos uniquement",
                "À gérer son emploi du temps",
                "À écrire des documents professionnels",
                "À sauvegarder ses contacts",
            ],
        ),
        Rule::new(
            "reseau_social",
            q("réseau social"),
            &[
                "Un outil de sauvegarde automatique",
                "Un système de gestion de fichiers en ligne",
                "Un logiciel de messagerie électronique",
                "Un service de stockage cloud",
            ],
        ),
        Rule::new(
            "authentification",
            any([q("compte personnel"), q("mot de passe")]),
            &[
                "Votre nom complet",
                "Votre adresse email uniquement",
                "Un code de vérification par SMS uniquement",
                "Votre empreinte digitale uniquement",
            ],
        ),
        Rule::new(
            "deconnexion",
            q("déconnecter"),
            &[
                "Fermer la fenêtre du navigateur",
                "Activer le mode navigation privée",
                "Vider le cache du navigateur",
                "Désactiver les cookies",
            ],
        ),
        Rule::new(
            "icone_maison",
            q("maison"),
            &[
                "L'accès aux paramètres du compte",
                "La page de profil utilisateur",
                "L'historique de navigation",
                "Les favoris enregistrés",
            ],
        ),
        Rule::new(
            "mise_en_gras",
            q("gras"),
            &[
                "Un 'S' barré (pour barré)",
                "Un 'I' incliné (pour italique)",
                "Un 'U' souligné (pour souligné)",
                "Un 'A' avec une flèche (pour taille)",
            ],
        ),
        Rule::new(
            "retour_ligne",
            q("ligne suivante"),
            &[
                "Appuyer plusieurs fois sur la barre d'espace",
                "Utiliser la touche Tab",
                "Cliquer en bas de la page",
                "Utiliser le raccourci Ctrl+L",
            ],
        ),
        Rule::new(
            "edition_texte",
            any([q("bojour"), q("ajouter")]),
            &[
                "J'utilise la fonction 'Rechercher et remplacer'",
                "Je surligne le mot et tape 'Bonjour'",
                "J'utilise la correction automatique",
                "Je double-clique sur le mot pour le corriger",
            ],
        ),
        Rule::new(
            "droits_images",
            all([q("image"), q("google")]),
            &[
                "Oui, si vous citez la source",
                "Oui, pour un usage personnel uniquement",
                "Oui, si vous modifiez légèrement l'image",
                "Oui, si l'image est en basse résolution",
            ],
        ),
        Rule::new(
            "citation",
            q("texte écrit par quelqu'un"),
            &[
                "Le paraphraser sans mentionner l'auteur",
                "Le mettre entre guillemets sans source",
                "L'utiliser tel quel si c'est court",
                "Le traduire dans une autre langue",
            ],
        ),
        Rule::new(
            "copyright",
            q("©"),
            &[
                "C indique la version du document (Copy)",
                "C'est un label de qualité certifiée",
                "Indication que le contenu peut être copié librement",
                "Marque de compatibilité avec les navigateurs",
            ],
        ),
        Rule::new(
            "volume",
            all([q("son"), q("fort")]),
            &[
                "Le contraste de l'écran",
                "Les paramètres d'égalisation audio",
                "La vitesse de lecture de la vidéo",
                "La résolution de la vidéo",
            ],
        ),
        Rule::new(
            "luminosite",
            all([q("écran"), q("sombre")]),
            &[
                "Le mode économie d'énergie",
                "Le contraste de l'écran",
                "Le délai de mise en veille",
                "La rotation automatique",
            ],
        ),
    ]
}

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// 内置的按等级通用候选
pub fn default_level_buckets() -> LevelBuckets {
    LevelBuckets {
        initial: owned(&[
            "Accéder aux paramètres",
            "Consulter l'aide en ligne",
            "Vérifier les mises à jour",
            "Redémarrer l'application",
        ]),
        intermediate: owned(&[
            "Paramétrer le pare-feu",
            "Vider le cache de l'application",
            "Mettre à jour le système d'exploitation",
            "Réinitialiser les paramètres réseau",
        ]),
        advanced: owned(&[
            "Configurer un reverse proxy",
            "Auditer les journaux système",
            "Déployer un système IDS",
            "Paramétrer une DMZ",
        ]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_bucket_has_four_distinct_candidates() {
        let buckets = default_level_buckets();
        let rules = default_rules();
        let mut lists: Vec<&Vec<String>> = rules.iter().map(|r| &r.candidates).collect();
        lists.extend([&buckets.initial, &buckets.intermediate, &buckets.advanced]);

        for list in lists {
            assert_eq!(list.len(), 4);
            let mut sorted = list.clone();
            sorted.sort();
            sorted.dedup();
            assert_eq!(sorted.len(), 4, "duplicate candidate in {:?}", list);
        }
    }

    #[test]
    fn test_rule_names_are_unique() {
        let rules = default_rules();
        let mut names: Vec<&str> = rules.iter().map(|r| r.name.as_str()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), rules.len());
    }
}
