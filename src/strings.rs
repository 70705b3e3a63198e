// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Localized UI strings.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Fr,
}

impl Language {
    /// Pick a language from a locale tag such as `fr_FR.UTF-8` or `en-US`.
    pub fn from_locale(locale: &str) -> Self {
        match locale.get(..2).map(str::to_ascii_lowercase).as_deref() {
            Some("fr") => Language::Fr,
            _ => Language::En,
        }
    }

    pub fn strings(self) -> &'static Strings {
        match self {
            Language::En => &EN,
            Language::Fr => &FR,
        }
    }
}

/// One language's string table.
pub struct Strings {
    pub app_title: &'static str,
    pub cancel: &'static str,
    pub submit: &'static str,
    pub sign_out: &'static str,
    pub load_more: &'static str,
    pub no_meme: &'static str,
    pub comment_placeholder: &'static str,
    pub comments: &'static str,
    pub add_captions: &'static str,
    pub add_caption: &'static str,
    pub delete_caption: &'static str,
    pub upload_picture: &'static str,
    pub describe_meme: &'static str,
    pub describe_meme_placeholder: &'static str,
    pub created: &'static str,
    pub select_picture: &'static str,
    pub drop_picture: &'static str,
    pub change_picture: &'static str,
    pub default_caption: &'static str,
    pub create_meme: &'static str,
    pub login_heading: &'static str,
    pub username: &'static str,
    pub password: &'static str,
    pub login_button: &'static str,
    pub username_required: &'static str,
    pub password_required: &'static str,
    pub wrong_credentials: &'static str,
    pub unsupported_picture: &'static str,
    pub generic_error: &'static str,
    pub session_expiring: &'static str,
    pub minutes: &'static str,
    pub session_expired: &'static str,
    pub just_now: &'static str,
    /// `{}` is replaced by the amount and unit.
    pub time_ago: &'static str,
    /// Singular and plural of minute, hour, day, week, month, year.
    pub time_units: [(&'static str, &'static str); 6],
}

impl Strings {
    /// Label for the `n`th caption added in the editor.
    pub fn default_caption(&self, n: usize) -> String {
        format!("{} {}", self.default_caption, n)
    }

    /// Warning shown shortly before the session ends.
    pub fn session_expiring_in(&self, minutes: i64) -> String {
        format!("{} {} {}", self.session_expiring, minutes, self.minutes)
    }
}

pub static EN: Strings = Strings {
    app_title: "MemeFactory",
    cancel: "Cancel",
    submit: "Submit",
    sign_out: "Sign Out",
    load_more: "Load More",
    no_meme: "No memes available",
    comment_placeholder: "Type your comment here...",
    comments: "comments",
    add_captions: "Add your captions",
    add_caption: "Add a caption",
    delete_caption: "Delete caption",
    upload_picture: "Upload your picture",
    describe_meme: "Describe your meme",
    describe_meme_placeholder: "Type your description here...",
    created: "Meme created",
    select_picture: "Select a picture",
    drop_picture: "or drop it in this area",
    change_picture: "Change picture",
    default_caption: "New caption",
    create_meme: "Create a meme",
    login_heading: "Login",
    username: "Username",
    password: "Password",
    login_button: "Login",
    username_required: "Username is required",
    password_required: "Password is required",
    wrong_credentials: "Wrong credentials",
    unsupported_picture: "Only PNG and JPEG pictures are supported",
    generic_error: "An error appeared. Try again in a few minutes.",
    session_expiring: "Your session will expire in",
    minutes: "minutes",
    session_expired: "Your session has expired, please sign in again",
    just_now: "just now",
    time_ago: "{} ago",
    time_units: [
        ("minute", "minutes"),
        ("hour", "hours"),
        ("day", "days"),
        ("week", "weeks"),
        ("month", "months"),
        ("year", "years"),
    ],
};

pub static FR: Strings = Strings {
    app_title: "MemeFactory",
    cancel: "Annuler",
    submit: "Valider",
    sign_out: "Se déconnecter",
    load_more: "Charger plus",
    no_meme: "Aucun meme disponible",
    comment_placeholder: "Écrivez votre commentaire ici...",
    comments: "commentaires",
    add_captions: "Ajoutez vos légendes",
    add_caption: "Ajouter une légende",
    delete_caption: "Supprimer la légende",
    upload_picture: "Téléversez votre image",
    describe_meme: "Décrivez votre meme",
    describe_meme_placeholder: "Écrivez votre description ici...",
    created: "Meme créé",
    select_picture: "Choisissez une image",
    drop_picture: "ou déposez-la dans cette zone",
    change_picture: "Changer d'image",
    default_caption: "Nouvelle légende",
    create_meme: "Créer un meme",
    login_heading: "Connexion",
    username: "Nom d'utilisateur",
    password: "Mot de passe",
    login_button: "Se connecter",
    username_required: "Le nom d'utilisateur est requis",
    password_required: "Le mot de passe est requis",
    wrong_credentials: "Identifiants incorrects",
    unsupported_picture: "Seules les images PNG et JPEG sont acceptées",
    generic_error: "Une erreur est survenue. Réessayez dans quelques minutes.",
    session_expiring: "Votre session va expirer dans",
    minutes: "minutes",
    session_expired: "Votre session a expiré, reconnectez-vous",
    just_now: "à l'instant",
    time_ago: "il y a {}",
    time_units: [
        ("minute", "minutes"),
        ("heure", "heures"),
        ("jour", "jours"),
        ("semaine", "semaines"),
        ("mois", "mois"),
        ("an", "ans"),
    ],
};
