use crate::models::{FilaImportada, FilaOferta, VistaPrevia};

use super::validacion::{resumir, validar_fila};

/// Columnas que el archivo debe traer en la cabecera. El esquema es fijo para
/// todo el pipeline, no configurable por llamada; columnas extra se ignoran.
pub const COLUMNAS_REQUERIDAS: [&str; 5] = [
    "carrera_sigla",
    "materia_codigo",
    "paralelo",
    "turno",
    "capacidad",
];

/// Valida el texto completo de una oferta y devuelve filas + resumen.
///
/// Es una función pura y síncrona: la misma entrada produce siempre el mismo
/// resultado, y cada pasada reemplaza por completo la anterior. Los problemas
/// de datos por fila nunca abortan la pasada (quedan como `estado = error` en
/// la fila); sólo los fallos estructurales (archivo vacío, columnas
/// requeridas ausentes) devuelven `Err` sin producir ninguna fila.
pub fn validar_oferta(texto: &str) -> Result<VistaPrevia, Box<dyn std::error::Error>> {
    // Separar en líneas aceptando \r\n o \n, recortar y descartar vacías.
    // La numeración de filas es la posición 1-based en esta lista filtrada,
    // con la cabecera como línea 1.
    let lineas: Vec<&str> = texto
        .split('\n')
        .map(|l| l.trim_end_matches('\r').trim())
        .filter(|l| !l.is_empty())
        .collect();

    if lineas.is_empty() {
        return Err("el archivo no contiene datos".into());
    }

    let cabecera: Vec<&str> = lineas[0].split(',').map(|c| c.trim()).collect();

    // Reportar TODAS las columnas ausentes de una vez, no sólo la primera.
    let faltantes: Vec<&str> = COLUMNAS_REQUERIDAS
        .iter()
        .filter(|req| !cabecera.contains(req))
        .copied()
        .collect();
    if !faltantes.is_empty() {
        return Err(format!("faltan columnas requeridas: {}", faltantes.join(", ")).into());
    }

    let indice = |nombre: &str| -> usize {
        // La cabecera ya se verificó completa; position nunca falla aquí.
        cabecera.iter().position(|c| *c == nombre).unwrap_or(0)
    };
    let idx_carrera = indice("carrera_sigla");
    let idx_materia = indice("materia_codigo");
    let idx_paralelo = indice("paralelo");
    let idx_turno = indice("turno");
    let idx_capacidad = indice("capacidad");

    let mut filas: Vec<FilaImportada> = Vec::new();
    for (pos, linea) in lineas.iter().enumerate().skip(1) {
        let celdas: Vec<&str> = linea.split(',').map(|c| c.trim()).collect();
        // Filas cortas: las celdas ausentes se resuelven como cadena vacía.
        let celda = |idx: usize| celdas.get(idx).copied().unwrap_or("").to_string();

        let campos = FilaOferta {
            carrera_sigla: celda(idx_carrera),
            materia_codigo: celda(idx_materia),
            paralelo: celda(idx_paralelo),
            turno: celda(idx_turno),
            capacidad: celda(idx_capacidad),
        };

        let (estado, mensaje) = validar_fila(&campos);
        filas.push(FilaImportada {
            numero: pos + 1,
            campos,
            estado,
            mensaje,
        });
    }

    let resumen = resumir(&filas);
    Ok(VistaPrevia { filas, resumen })
}
