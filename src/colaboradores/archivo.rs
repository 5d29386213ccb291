// Implementaciones locales respaldadas en disco, al estilo del resto del
// sistema: un JSON por colección bajo `data/`. Sirven para desarrollo y para
// despliegues sin el backend completo.

use std::fs::{OpenOptions, create_dir_all};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use crate::models::{EstadoMarcado, MarcaAsistencia, ResultadoConfirm, SesionProgramada, VistaPrevia};

use super::{RepositorioSesiones, ServidorOferta};

/// Repositorio de sesiones sobre `<dir>/sesiones.json`. El archivo es la
/// fuente de verdad completa: se lee entero en cada operación y se reescribe
/// entero al marcar (volúmenes de un departamento, no hace falta más).
pub struct SesionesArchivo {
    ruta: PathBuf,
}

impl SesionesArchivo {
    pub fn new(dir: &Path) -> SesionesArchivo {
        SesionesArchivo {
            ruta: dir.join("sesiones.json"),
        }
    }

    fn leer_todas(&self) -> Result<Vec<SesionProgramada>, Box<dyn std::error::Error>> {
        if !self.ruta.exists() {
            return Ok(Vec::new());
        }
        let contenido = std::fs::read_to_string(&self.ruta)?;
        if contenido.trim().is_empty() {
            return Ok(Vec::new());
        }
        let sesiones: Vec<SesionProgramada> = serde_json::from_str(&contenido)?;
        Ok(sesiones)
    }

    fn escribir_todas(&self, sesiones: &[SesionProgramada]) -> Result<(), Box<dyn std::error::Error>> {
        if let Some(dir) = self.ruta.parent() {
            create_dir_all(dir)?;
        }
        let texto = serde_json::to_string_pretty(sesiones)?;
        let mut f = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&self.ruta)?;
        f.write_all(texto.as_bytes())?;
        Ok(())
    }
}

impl RepositorioSesiones for SesionesArchivo {
    fn listar_sesiones(
        &self,
        fecha: NaiveDate,
    ) -> Result<Vec<SesionProgramada>, Box<dyn std::error::Error>> {
        let todas = self.leer_todas()?;
        Ok(todas.into_iter().filter(|s| s.fecha == fecha).collect())
    }

    fn marcar_asistencia(
        &self,
        marca: &MarcaAsistencia,
    ) -> Result<bool, Box<dyn std::error::Error>> {
        let mut sesiones = self.leer_todas()?;
        let sesion = sesiones
            .iter_mut()
            .find(|s| s.id == marca.sesion_id && s.fecha == marca.fecha);
        match sesion {
            Some(s) if s.estado == EstadoMarcado::SinMarcar => {
                s.estado = marca.estado;
                self.escribir_todas(&sesiones)?;
                Ok(true)
            }
            // Ya marcada: el marcado es de una sola vez, no se sobreescribe.
            Some(_) => Ok(false),
            None => Err(format!(
                "no existe la sesión {} en la fecha {}",
                marca.sesion_id, marca.fecha
            )
            .into()),
        }
    }
}

/// Sustituto local del backend de ofertas: `confirmar` guarda el archivo tal
/// cual bajo `<dir>/ofertas/` y reporta cuántas filas de datos recibió. No
/// sabe leer planillas, así que `preview` de formatos no-CSV falla con un
/// mensaje claro en lugar de intentar parsearlas.
pub struct OfertaArchivo {
    dir: PathBuf,
}

impl OfertaArchivo {
    pub fn new(dir: &Path) -> OfertaArchivo {
        OfertaArchivo {
            dir: dir.join("ofertas"),
        }
    }
}

impl ServidorOferta for OfertaArchivo {
    fn preview(
        &self,
        _archivo: &[u8],
        _gestion: &str,
    ) -> Result<VistaPrevia, Box<dyn std::error::Error>> {
        Err("el backend local no soporta vista previa de planillas; suba un CSV".into())
    }

    fn confirmar(
        &self,
        archivo: &[u8],
        gestion: &str,
    ) -> Result<ResultadoConfirm, Box<dyn std::error::Error>> {
        // El identificador termina en un nombre de archivo: sólo
        // alfanuméricos, guión y guión bajo, en cualquier plataforma.
        let valido = !gestion.is_empty()
            && gestion
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valido {
            return Err(format!("identificador de gestión inválido: '{}'", gestion).into());
        }
        create_dir_all(&self.dir)?;
        let destino = self.dir.join(format!("oferta_{}.csv", gestion));
        std::fs::write(&destino, archivo)?;

        // Filas de datos recibidas: líneas no vacías menos la cabecera.
        let texto = String::from_utf8_lossy(archivo);
        let lineas = texto
            .split('\n')
            .map(|l| l.trim_end_matches('\r').trim())
            .filter(|l| !l.is_empty())
            .count();
        let insertados = lineas.saturating_sub(1);

        Ok(ResultadoConfirm {
            insertados,
            actualizados: 0,
            omitidos: 0,
            errores: 0,
        })
    }
}
