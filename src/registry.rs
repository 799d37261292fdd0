//! The source registry: every outlet the pipeline crawls, with its
//! extractor configuration and political orientation label.
//!
//! The registry is built once per run and never mutated. Adding an outlet
//! means adding one entry here (plus its extractor module); removing one
//! means deleting its entry. Entry order fixes the order of the
//! consolidated table, not which outlets run first to completion.

use crate::extract::Extractor;
use crate::models::Espectro;
use crate::scrapers::{
    cerosetenta::CeroSetenta, cuestionpublica::CuestionPublica, el_nuevo_siglo::ElNuevoSiglo,
    lafm::LaFM, lasillavacia::LaSillaVacia, lavoragine::LaVoragine, pacifista::Pacifista,
    semanariovoz::SemanarioVoz,
};

/// One registry entry: outlet identity, orientation, and its configured
/// extractor.
pub struct SourceConfig {
    pub medio: &'static str,
    pub espectro: Espectro,
    pub extractor: Box<dyn Extractor>,
}

impl SourceConfig {
    fn new(medio: &'static str, espectro: Espectro, extractor: Box<dyn Extractor>) -> Self {
        Self {
            medio,
            espectro,
            extractor,
        }
    }
}

/// All registered outlets, in consolidated-table order.
pub fn sources() -> Vec<SourceConfig> {
    vec![
        SourceConfig::new(
            "ElNuevoSiglo",
            Espectro::Derecha,
            Box::new(ElNuevoSiglo::new(vec![
                "https://www.elnuevosiglo.com.co/sitemap.xml?page=1".to_string(),
                "https://www.elnuevosiglo.com.co/sitemap.xml?page=2".to_string(),
            ])),
        ),
        SourceConfig::new(
            "LaFM",
            Espectro::Derecha,
            Box::new(LaFM::new("https://www.lafm.com.co/politica")),
        ),
        SourceConfig::new(
            "LaVoragine",
            Espectro::Izquierda,
            Box::new(LaVoragine::new("https://voragine.co/post-sitemap.xml")),
        ),
        SourceConfig::new(
            "CeroSetenta",
            Espectro::Izquierda,
            Box::new(CeroSetenta::new(
                "https://cerosetenta.uniandes.edu.co/tema/politica/",
            )),
        ),
        SourceConfig::new(
            "SemanarioVoz",
            Espectro::Izquierda,
            Box::new(SemanarioVoz::new("https://semanariovoz.com/category/politica/")),
        ),
        SourceConfig::new(
            "CuestionPublica",
            Espectro::Centro,
            Box::new(CuestionPublica::new(
                "https://cuestionpublica.com/sitemap_index.xml",
            )),
        ),
        SourceConfig::new(
            "Pacifista",
            Espectro::Centro,
            Box::new(Pacifista::new("https://pacifista.tv/post-sitemap.xml")),
        ),
        SourceConfig::new(
            "LaSillaVacia",
            Espectro::Centro,
            Box::new(LaSillaVacia::new(
                "https://www.lasillavacia.com/sitemap_index.xml",
            )),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use itertools::Itertools;

    #[test]
    fn test_registry_has_eight_unique_outlets() {
        let sources = sources();
        assert_eq!(sources.len(), 8);
        let unique = sources.iter().map(|s| s.medio).unique().count();
        assert_eq!(unique, 8);
    }

    #[test]
    fn test_registry_orientation_labels() {
        let sources = sources();
        let count_of = |espectro: Espectro| {
            sources
                .iter()
                .filter(|s| s.espectro == espectro)
                .count()
        };
        assert_eq!(count_of(Espectro::Derecha), 2);
        assert_eq!(count_of(Espectro::Izquierda), 3);
        assert_eq!(count_of(Espectro::Centro), 3);
    }

    #[test]
    fn test_registry_order_is_stable() {
        let medios: Vec<&str> = sources().iter().map(|s| s.medio).collect();
        assert_eq!(
            medios,
            vec![
                "ElNuevoSiglo",
                "LaFM",
                "LaVoragine",
                "CeroSetenta",
                "SemanarioVoz",
                "CuestionPublica",
                "Pacifista",
                "LaSillaVacia",
            ]
        );
    }
}
