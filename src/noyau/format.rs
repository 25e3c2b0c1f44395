// src/noyau/format.rs
//
// Affichage canonique des polynômes :
// - exposants décroissants, coefficients nuls omis
// - ±1 élidé devant la variable (x, -x), jamais pour la constante
// - premier terme : signe littéral ; suivants : " + " / " - "
// - coefficients entiers sans point décimal
// - liste vide => "0"

use num_traits::ToPrimitive;

use super::polynome::Polynomial;

/// Coefficient : entier sans point décimal, sinon affichage f64 par défaut.
fn format_coeff(c: f64) -> String {
    if c.fract() == 0.0 {
        if let Some(n) = c.to_i64() {
            return n.to_string();
        }
    }
    format!("{c}")
}

/// Terme de coefficient `a` (>= 0, déjà sans signe) et d’exposant `p`.
fn format_terme(a: f64, p: u32, var: &str) -> String {
    let puissance = match p {
        0 => return format_coeff(a),
        1 => var.to_string(),
        _ => format!("{var}**{p}"),
    };

    if a == 1.0 {
        puissance
    } else {
        format!("{}*{puissance}", format_coeff(a))
    }
}

/// Texte canonique de `poly` dans la variable `var`.
pub fn format_polynome(poly: &Polynomial, var: &str) -> String {
    let mut out = String::new();

    for (p, c) in poly.terms().rev().filter(|(_, c)| *c != 0.0) {
        let negatif = c < 0.0;
        let corps = format_terme(c.abs(), p, var);

        if out.is_empty() {
            if negatif {
                out.push('-');
            }
        } else {
            out.push_str(if negatif { " - " } else { " + " });
        }
        out.push_str(&corps);
    }

    if out.is_empty() {
        return "0".to_string();
    }
    out
}
