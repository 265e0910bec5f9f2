//! Localized error fragments for demo responses.
//!
//! Demo pages are served to end users of the customer's demo, so
//! resolution failures render a small self-contained HTML fragment in
//! the viewer's language instead of a JSON error.

/// Languages the demo error fragments are available in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Lang {
    #[default]
    En,
    Es,
    De,
}

impl Lang {
    /// Pick a supported language from an `Accept-Language` header
    /// value. Falls back to English.
    pub fn negotiate(accept_language: Option<&str>) -> Self {
        let Some(header) = accept_language else {
            return Lang::En;
        };
        for entry in header.split(',') {
            let tag = entry.split(';').next().unwrap_or("").trim();
            let primary = tag.split('-').next().unwrap_or("");
            match primary.to_ascii_lowercase().as_str() {
                "en" => return Lang::En,
                "es" => return Lang::Es,
                "de" => return Lang::De,
                _ => continue,
            }
        }
        Lang::En
    }

    pub fn html_lang(self) -> &'static str {
        match self {
            Lang::En => "en",
            Lang::Es => "es",
            Lang::De => "de",
        }
    }
}

fn fragment(lang: Lang, title: &str, message: &str) -> String {
    format!(
        "<!DOCTYPE html>\
         <html lang=\"{}\"><head><meta charset=\"utf-8\"><title>{title}</title></head>\
         <body><main style=\"font-family:sans-serif;text-align:center;padding:4rem\">\
         <h1>{title}</h1><p>{message}</p></main></body></html>",
        lang.html_lang()
    )
}

/// Body for an unresolved project, version, or page.
pub fn not_found_page(lang: Lang) -> String {
    let (title, message) = match lang {
        Lang::En => ("Demo page not found", "The requested demo page does not exist."),
        Lang::Es => (
            "Página de demo no encontrada",
            "La página de demo solicitada no existe.",
        ),
        Lang::De => (
            "Demo-Seite nicht gefunden",
            "Die angeforderte Demo-Seite existiert nicht.",
        ),
    };
    fragment(lang, title, message)
}

/// Detail-free body for any unexpected serving failure.
pub fn internal_error_page(lang: Lang) -> String {
    let (title, message) = match lang {
        Lang::En => (
            "Something went wrong",
            "The demo page could not be served. Please try again later.",
        ),
        Lang::Es => (
            "Algo salió mal",
            "No se pudo mostrar la página de demo. Inténtelo de nuevo más tarde.",
        ),
        Lang::De => (
            "Etwas ist schiefgelaufen",
            "Die Demo-Seite konnte nicht ausgeliefert werden. Bitte versuchen Sie es später erneut.",
        ),
    };
    fragment(lang, title, message)
}
