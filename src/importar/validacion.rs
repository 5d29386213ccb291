use crate::models::{EstadoFila, FilaImportada, FilaOferta, ResumenImport, Turno};

/// Aplica la cadena de reglas a una fila ya extraída. Las reglas se evalúan
/// en orden y la primera que falla decide el veredicto (no se acumulan
/// mensajes). La validación local nunca produce `Warn`: ese estado queda
/// reservado para la vista previa del servidor.
pub fn validar_fila(campos: &FilaOferta) -> (EstadoFila, Option<String>) {
    // Regla a: campos identificadores no vacíos
    if campos.carrera_sigla.is_empty() || campos.materia_codigo.is_empty() || campos.paralelo.is_empty()
    {
        return (
            EstadoFila::Error,
            Some("carrera_sigla, materia_codigo y paralelo son obligatorios".to_string()),
        );
    }

    // Regla b: turno literal exacto
    if Turno::parse(&campos.turno).is_none() {
        return (
            EstadoFila::Error,
            Some(format!(
                "turno inválido '{}': debe ser manana, tarde o noche",
                campos.turno
            )),
        );
    }

    // Regla c: capacidad sólo dígitos (sin signo, sin decimales, sin espacios)
    if campos.capacidad.is_empty() || !campos.capacidad.chars().all(|c| c.is_ascii_digit()) {
        return (
            EstadoFila::Error,
            Some(format!(
                "capacidad inválida '{}': debe ser un entero sin signo",
                campos.capacidad
            )),
        );
    }

    // Regla d: capacidad mayor a cero. El caso Err sólo puede ser desborde
    // (la cadena ya es dígitos puros), que no es lo mismo que un cero.
    match campos.capacidad.parse::<u64>() {
        Ok(0) => (
            EstadoFila::Error,
            Some(format!(
                "capacidad '{}' debe ser mayor a 0",
                campos.capacidad
            )),
        ),
        Ok(_) => (EstadoFila::Ok, None),
        Err(_) => (
            EstadoFila::Error,
            Some(format!(
                "capacidad '{}' fuera de rango",
                campos.capacidad
            )),
        ),
    }
}

/// Resumen agregado de una pasada: `total = ok + warn + error`. Se calcula
/// desde cero sobre la lista completa, nunca incrementalmente.
pub fn resumir(filas: &[FilaImportada]) -> ResumenImport {
    let mut resumen = ResumenImport {
        total: filas.len(),
        ok: 0,
        warn: 0,
        error: 0,
    };
    for fila in filas {
        match fila.estado {
            EstadoFila::Ok => resumen.ok += 1,
            EstadoFila::Warn => resumen.warn += 1,
            EstadoFila::Error => resumen.error += 1,
        }
    }
    resumen
}
