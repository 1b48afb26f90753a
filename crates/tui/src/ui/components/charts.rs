use std::collections::BTreeMap;

/// The four fixed time-of-day bands of the PIX distribution.
pub const BANDAS_HORARIO: [&str; 4] = [
    "00:00 às 06:00",
    "07:00 às 13:00",
    "14:00 às 19:00",
    "20:00 às 23:00",
];

/// Resolves the distribution against the fixed bands.
///
/// A band absent from the map counts as zero, as does a missing map.
pub fn distribuicao_por_banda(
    horarios: Option<&BTreeMap<String, f64>>,
) -> [(&'static str, f64); 4] {
    BANDAS_HORARIO.map(|banda| {
        let valor = horarios
            .and_then(|mapa| mapa.get(banda))
            .copied()
            .unwrap_or(0.0);
        (banda, valor)
    })
}

/// Share of `valor` in `total`, as a whole percentage.
pub fn percentual(valor: f64, total: f64) -> u16 {
    if total <= 0.0 {
        return 0;
    }
    ((valor / total) * 100.0).round().min(100.0) as u16
}

/// ASCII percentage bar: `████░░░░░░  40%`.
pub fn barra_percentual(percentual: u16, largura: usize) -> String {
    let cheio = ((percentual as usize * largura) / 100).min(largura);
    let vazio = largura.saturating_sub(cheio);
    format!(
        "{}{} {:>3}%",
        "█".repeat(cheio),
        "░".repeat(vazio),
        percentual
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bandas_ausentes_do_mapa_valem_zero() {
        let mut mapa = BTreeMap::new();
        mapa.insert("07:00 às 13:00".to_string(), 12.0);
        mapa.insert("14:00 às 19:00".to_string(), 28.0);

        let bandas = distribuicao_por_banda(Some(&mapa));
        assert_eq!(bandas[0], ("00:00 às 06:00", 0.0));
        assert_eq!(bandas[1], ("07:00 às 13:00", 12.0));
        assert_eq!(bandas[2], ("14:00 às 19:00", 28.0));
        assert_eq!(bandas[3], ("20:00 às 23:00", 0.0));
    }

    #[test]
    fn mapa_ausente_zera_todas_as_bandas() {
        let bandas = distribuicao_por_banda(None);
        assert!(bandas.iter().all(|(_, valor)| *valor == 0.0));
    }

    #[test]
    fn percentual_ignora_total_zero() {
        assert_eq!(percentual(10.0, 0.0), 0);
        assert_eq!(percentual(10.0, 40.0), 25);
        assert_eq!(percentual(40.0, 40.0), 100);
    }

    #[test]
    fn barra_preenche_proporcional_a_largura() {
        assert_eq!(barra_percentual(50, 10), "█████░░░░░  50%");
        assert_eq!(barra_percentual(0, 4), "░░░░   0%");
        assert_eq!(barra_percentual(100, 4), "████ 100%");
    }
}
