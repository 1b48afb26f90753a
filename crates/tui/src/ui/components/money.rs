/// Formats an amount as Brazilian currency: `R$ 1.234,56`.
pub fn format_brl(valor: f64) -> String {
    let negativo = valor < 0.0;
    let centavos = (valor.abs() * 100.0).round() as u64;
    let inteiro = centavos / 100;
    let fracao = centavos % 100;

    let digitos = inteiro.to_string();
    let mut agrupado = String::new();
    for (i, ch) in digitos.chars().enumerate() {
        if i > 0 && (digitos.len() - i) % 3 == 0 {
            agrupado.push('.');
        }
        agrupado.push(ch);
    }

    let sinal = if negativo { "-" } else { "" };
    format!("{sinal}R$ {agrupado},{fracao:02}")
}

#[cfg(test)]
mod tests {
    use super::format_brl;

    #[test]
    fn agrupa_milhares_e_usa_virgula_decimal() {
        assert_eq!(format_brl(0.0), "R$ 0,00");
        assert_eq!(format_brl(150.5), "R$ 150,50");
        assert_eq!(format_brl(1234.56), "R$ 1.234,56");
        assert_eq!(format_brl(1_234_567.89), "R$ 1.234.567,89");
        assert_eq!(format_brl(-12.3), "-R$ 12,30");
    }
}
