//! Fixed first-run datasets.

use crate::model::record_date::format_record_date;
use crate::model::schematic::SchematicDraft;
use crate::model::task::TaskDraft;
use chrono::NaiveDate;

/// `(title, description, category, severity, solution)`
#[rustfmt::skip]
const DEMO_TASKS: [(&str, &str, &str, &str, &str); 10] = [
    ("Hab 101 - Fuga Agua AC", "Bandeja condensador obstruida.", "clima", "medium", "Limpieza con nitrógeno a presión."),
    ("Cocina - Revisión Hornos", "El horno 2 no calienta uniforme.", "cocina", "high", "Sustitución resistencia inferior defectuosa."),
    ("Piscina - Ajuste pH/Cloro", "Niveles fuera de rango.", "piscina", "low", "Recalibración de sondas y adición de minorador."),
    ("Calentador Central - Error E04", "Presostato no activa.", "calentador", "critical", "Limpieza de venturi y tubos de silicona."),
    ("Hab 202 - Luces Led Parpadeo", "Driver en mal estado.", "iluminacion", "low", "Cambiado driver 12V 50W."),
    ("Cuadro Garaje - Diferencial 01", "Disparo intempestivo.", "otros", "medium", "Localizada derivación en motor extractor."),
    ("Recepción - Toma Datos", "Sin conexión internet.", "otros", "medium", "Crimpado de nuevo conector RJ45."),
    ("Zonas Comunes - Farolas", "Vandalismo farola 4.", "iluminacion", "medium", "Reposición de cristal y lámpara sodio."),
    ("Lavandería - Secadora 3", "No gira tambor.", "otros", "high", "Cambio de correa de transmisión."),
    ("Gimnasio - Cinta Correr", "Error sobrecarga.", "otros", "low", "Lubricación de tapadera y ajuste tensión."),
];

/// `(title, category, img)`
#[rustfmt::skip]
const DEFAULT_SCHEMATICS: [(&str, &str, &str); 10] = [
    ("Cuadro Clima General (Chillers)", "clima-hvac", "https://circuitoelectrico.com/wp-content/uploads/esquema-cuadro-electrico-vivienda-basica.jpg"),
    ("Grupo Presión ACS - Benidorm Center", "acs-calderas", "https://ventageneradores.net/blog/wp-content/uploads/2022/10/esquema-conexion-resistencias-trifasicas.jpg"),
    ("Automatismo Piscina / SPA Cloro", "spa-piscina", "https://images.squarespace-cdn.com/content/v1/568972c7a12f442f4ec3d9e4/1495047863577-9ST3Q2X1G9Y6C4F1G9O1/Esquema+cuadro+piscina.png"),
    ("Arranque Extractores Lavandería", "cocina-ind", "https://www.areatecnologia.com/electricidad/img/arranque_estrella_triangulo.jpg"),
    ("Distribución Planta 1-5 (Cuadros)", "cuadros-gral", "https://luzmart.es/wp-content/uploads/cuadro-electrico-vivienda-esquema.jpg"),
    ("Cuadro General SPA / Wellness", "spa-piscina", "https://descubre.tiendafotovoltaica.es/wp-content/uploads/2019/12/Esquema-Portero-Electronico.jpg"),
    ("Instalación Bomba de Incendios", "emergencia", "https://luzmart.es/wp-content/uploads/esquema-luces-emergencia.jpg"),
    ("Circuito Cocinas Planta Baja", "cocina-ind", "https://circuitoelectrico.com/wp-content/uploads/esquemas-instalaciones-enlace-unifilar.jpg"),
    ("Control Clima Lobby & Recepción", "clima-hvac", "https://www.coolfy.net/wp-content/uploads/diagrama-conexion-aire-acondicionado-inverter.jpg"),
    ("Cuadro Maquinaria Ascensores", "otros", "https://www.bibliocad.com/wp-content/uploads/2020/07/diagrama-electrico-unifilar-de-un-hotel-nuevo.jpg"),
];

/// Demonstration tasks, all dated `today`.
pub fn demo_task_drafts(today: NaiveDate) -> Vec<TaskDraft> {
    let date = format_record_date(today);
    DEMO_TASKS
        .iter()
        .map(|(title, description, category, severity, solution)| TaskDraft {
            title: Some((*title).to_string()),
            description: Some((*description).to_string()),
            category: Some((*category).to_string()),
            severity: Some((*severity).to_string()),
            solution: Some((*solution).to_string()),
            date: Some(date.clone()),
            ..TaskDraft::default()
        })
        .collect()
}

/// Default reference schematics installed on first run.
pub fn default_schematic_drafts() -> Vec<SchematicDraft> {
    DEFAULT_SCHEMATICS
        .iter()
        .map(|(title, category, img)| SchematicDraft::new(*title, *category, *img))
        .collect()
}
