//! Corpus sources: where record snapshots come from.
//!
//! An index build always consumes the full snapshot from a source; there is
//! no partial or incremental feed. Sources are deliberately dumb so the
//! engine stays storage-agnostic.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;
use tracing::{debug, warn};

use crate::error::Error;
use crate::traits::CorpusSource;
use crate::types::Record;

/// Fixed in-memory corpus. Every `fetch_all` returns the snapshot given at
/// construction.
pub struct StaticCorpus {
    records: Vec<Record>,
}

impl StaticCorpus {
    pub fn new(records: Vec<Record>) -> Self {
        Self { records }
    }

    /// The built-in demo corpus.
    pub fn seeded() -> Self {
        Self::new(seed_records())
    }
}

impl CorpusSource for StaticCorpus {
    fn fetch_all(&self) -> Result<Vec<Record>> {
        Ok(self.records.clone())
    }
}

/// Reads every `*.json` file under a directory tree; each file holds one JSON
/// array of records. Files are visited in sorted path order so a snapshot is
/// reproducible.
pub struct JsonDirSource {
    dir: PathBuf,
}

impl JsonDirSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn list_record_files(root: &Path) -> Vec<PathBuf> {
        let mut json_files = Vec::new();
        for entry in walkdir::WalkDir::new(root)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
        {
            let path = entry.path();
            if path.extension().and_then(|s| s.to_str()) == Some("json") {
                json_files.push(path.to_path_buf());
            }
        }
        json_files.sort();
        json_files
    }
}

impl CorpusSource for JsonDirSource {
    fn fetch_all(&self) -> Result<Vec<Record>> {
        let files = Self::list_record_files(&self.dir);
        if files.is_empty() {
            warn!(dir = %self.dir.display(), "no .json record batches found");
            return Ok(vec![]);
        }
        let mut records = Vec::new();
        for path in &files {
            let content = fs::read_to_string(path).map_err(|e| {
                Error::Corpus(format!("failed to read {}: {e}", path.display()))
            })?;
            let batch: Vec<Record> = serde_json::from_str(&content).map_err(|e| {
                Error::Corpus(format!("failed to parse {}: {e}", path.display()))
            })?;
            records.extend(batch);
        }
        debug!(files = files.len(), records = records.len(), "loaded corpus snapshot");
        Ok(records)
    }
}

/// The ten-entry Spanish support corpus used for demos and seeding.
pub fn seed_records() -> Vec<Record> {
    let seed: [(&str, &str, &str); 10] = [
        (
            "¿Cuáles son los horarios de atención?",
            "Lun–Vie 8:00–17:00.",
            "soporte,horario",
        ),
        (
            "¿Tienen planes y precios?",
            "Básico ($9), Pro ($19), Empresa ($49).",
            "planes,precios",
        ),
        (
            "¿Qué métodos de pago aceptan?",
            "Tarjeta y transferencia.",
            "pagos",
        ),
        (
            "¿Cómo contacto soporte?",
            "soporte@ejemplo.com o chat en la web.",
            "soporte,contacto",
        ),
        (
            "¿Cómo cancelo mi suscripción?",
            "Panel → Configuración → Suscripción.",
            "suscripcion",
        ),
        (
            "¿Ofrecen prueba gratis?",
            "Sí, 7 días en Plan Pro.",
            "planes,trial",
        ),
        (
            "¿Política de reembolso?",
            "14 días si no cumple expectativas.",
            "legal,reembolsos",
        ),
        (
            "¿Puedo cambiar de plan?",
            "Sí, en cualquier momento.",
            "planes",
        ),
        (
            "¿Cómo recupero mi contraseña?",
            "Usa 'Olvidé mi contraseña' en la pantalla de acceso.",
            "cuentas,seguridad",
        ),
        (
            "¿Dónde veo mis facturas?",
            "Panel → Facturación → Historial.",
            "pagos,facturacion",
        ),
    ];
    seed.iter()
        .enumerate()
        .map(|(i, &(question, answer, tags))| Record {
            id: (i + 1).to_string(),
            question: question.to_string(),
            answer: answer.to_string(),
            tags: tags.to_string(),
        })
        .collect()
}
