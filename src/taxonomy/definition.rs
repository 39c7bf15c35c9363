//! Taxonomy definitions
//!
//! The forest is loaded wholesale at startup, either from the built-in
//! retail definition below or from an external JSON file of nested
//! `{id, display_name, children?}` records. There is no versioned format or
//! migration concern; the definition is not persisted separately from the
//! running code.

use crate::error::ForestError;
use crate::taxonomy::{CategoryNode as N, Forest};
use std::path::Path;

/// The built-in retail classification forest.
///
/// Depth varies per branch: "PC Juegos" is a 1-level leaf while
/// "Juegos > Retro > Nintendo > Game Boy > Juegos" is 5 levels. Display
/// names like "Consolas", "Juegos" and "Accesorios" deliberately recur
/// under different parents; ids are globally unique.
pub fn default_forest() -> Forest {
    Forest::new(vec![
        N::branch(
            "juegos",
            "Juegos",
            vec![
                N::branch(
                    "juegos-ps5",
                    "PS5",
                    vec![
                        N::leaf("ps5-juegos", "Juegos"),
                        N::leaf("ps5-accesorios", "Accesorios"),
                    ],
                ),
                N::branch(
                    "juegos-xbox",
                    "Xbox",
                    vec![
                        N::leaf("xbox-juegos", "Juegos"),
                        N::leaf("xbox-accesorios", "Accesorios"),
                    ],
                ),
                N::branch(
                    "juegos-switch",
                    "Nintendo Switch",
                    vec![
                        N::leaf("switch-juegos", "Juegos"),
                        N::leaf("switch-accesorios", "Accesorios"),
                    ],
                ),
                N::branch(
                    "juegos-retro",
                    "Retro",
                    vec![
                        N::branch(
                            "retro-nintendo",
                            "Nintendo",
                            vec![
                                N::branch(
                                    "nintendo-gameboy",
                                    "Game Boy",
                                    vec![
                                        N::leaf("gameboy-juegos", "Juegos"),
                                        N::leaf("gameboy-consolas", "Consolas"),
                                        N::leaf("gameboy-accesorios", "Accesorios"),
                                    ],
                                ),
                                N::branch(
                                    "nintendo-nes",
                                    "NES",
                                    vec![
                                        N::leaf("nes-juegos", "Juegos"),
                                        N::leaf("nes-consolas", "Consolas"),
                                    ],
                                ),
                                N::branch(
                                    "nintendo-snes",
                                    "SNES",
                                    vec![
                                        N::leaf("snes-juegos", "Juegos"),
                                        N::leaf("snes-consolas", "Consolas"),
                                    ],
                                ),
                            ],
                        ),
                        N::branch(
                            "retro-sega",
                            "Sega",
                            vec![
                                N::leaf("sega-juegos", "Juegos"),
                                N::leaf("sega-consolas", "Consolas"),
                            ],
                        ),
                    ],
                ),
            ],
        ),
        N::branch(
            "consolas",
            "Consolas",
            vec![
                N::leaf("consolas-ps5", "PS5"),
                N::leaf("consolas-xbox", "Xbox"),
                N::leaf("consolas-switch", "Nintendo Switch"),
            ],
        ),
        N::branch(
            "moviles",
            "Móviles",
            vec![
                N::leaf("moviles-smartphones", "Smartphones"),
                N::leaf("moviles-fundas", "Fundas"),
                N::leaf("moviles-accesorios", "Accesorios"),
            ],
        ),
        N::branch(
            "informatica",
            "Informática",
            vec![
                N::leaf("informatica-portatiles", "Portátiles"),
                N::leaf("informatica-perifericos", "Periféricos"),
                N::branch(
                    "informatica-componentes",
                    "Componentes",
                    vec![
                        N::leaf("componentes-graficas", "Tarjetas Gráficas"),
                        N::leaf("componentes-memoria", "Memoria"),
                        N::leaf("componentes-almacenamiento", "Almacenamiento"),
                    ],
                ),
            ],
        ),
        N::branch(
            "audio",
            "Audio",
            vec![
                N::leaf("audio-auriculares", "Auriculares"),
                N::leaf("audio-altavoces", "Altavoces"),
            ],
        ),
        N::leaf("pc-juegos", "PC Juegos"),
        N::leaf("merchandising", "Merchandising"),
    ])
}

impl Forest {
    /// Parse a forest from a JSON array of nested category records.
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Load a forest definition from an external JSON file.
pub fn load_definition(path: &Path) -> Result<Forest, ForestError> {
    let content = std::fs::read_to_string(path).map_err(|e| ForestError::DefinitionRead {
        path: path.display().to_string(),
        source: e,
    })?;
    Forest::from_json_str(&content).map_err(|e| ForestError::DefinitionParse {
        path: path.display().to_string(),
        source: e,
    })
}
