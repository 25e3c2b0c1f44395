// src/noyau/jetons.rs

use super::erreur::CalcError;

#[derive(Clone, Debug, PartialEq)]
pub enum Tok {
    Num(f64),

    // Fonctions, constantes et variables (tout ce qui n’est pas opérateur / nombre).
    // NOTE: c’est la RPN qui décide : suivi de '(' => appel, sinon => atome.
    Ident(String),

    Plus,
    Minus,
    Star,
    Slash,
    Caret, // ^ ou **

    Comma,
    LPar,
    RPar,
}

/// Tokenize une chaîne en jetons.
/// Supporte:
/// - nombres décimaux (ex: 12, 3.5, .5, 1e-3, 2.5E+4)
/// - opérateurs + - * / ^ et ** (synonyme de ^)
/// - parenthèses ( ) et virgule (arguments)
/// - π (équivaut à ident("π"))
/// - identifiants [a-zA-Z_][a-zA-Z0-9_]* (casse conservée)
/// - √ (équivaut à ident("sqrt"))
pub fn tokenize(s: &str) -> Result<Vec<Tok>, CalcError> {
    let mut out = Vec::new();
    let chars: Vec<char> = s.chars().collect();
    let mut i: usize = 0;

    while i < chars.len() {
        let c = chars[i];

        if c.is_whitespace() {
            i += 1;
            continue;
        }

        // Ponctuation + opérateurs
        let simple = match c {
            '(' => Some(Tok::LPar),
            ')' => Some(Tok::RPar),
            ',' => Some(Tok::Comma),
            '+' => Some(Tok::Plus),
            '-' => Some(Tok::Minus),
            '/' => Some(Tok::Slash),
            '^' => Some(Tok::Caret),
            '*' => {
                // "**" : puissance (forme polynôme)
                if chars.get(i + 1) == Some(&'*') {
                    i += 1;
                    Some(Tok::Caret)
                } else {
                    Some(Tok::Star)
                }
            }
            '×' => Some(Tok::Star),
            '÷' => Some(Tok::Slash),
            _ => None,
        };
        if let Some(t) = simple {
            out.push(t);
            i += 1;
            continue;
        }

        if c == 'π' {
            out.push(Tok::Ident("π".to_string()));
            i += 1;
            continue;
        }

        // Racine carrée unicode : √  => ident("sqrt")
        if c == '√' {
            out.push(Tok::Ident("sqrt".to_string()));
            i += 1;
            continue;
        }

        // Identifiants ASCII : [a-zA-Z_][a-zA-Z0-9_]*
        if c.is_ascii_alphabetic() || c == '_' {
            let start = i;
            i += 1;
            while i < chars.len() && (chars[i].is_ascii_alphanumeric() || chars[i] == '_') {
                i += 1;
            }
            out.push(Tok::Ident(chars[start..i].iter().collect()));
            continue;
        }

        if c.is_ascii_digit() || (c == '.' && chars.get(i + 1).is_some_and(char::is_ascii_digit)) {
            let (n, fin) = lire_nombre(&chars, i)?;
            out.push(Tok::Num(n));
            i = fin;
            continue;
        }

        return Err(CalcError::invalide(format!(
            "caractère inattendu '{c}' (position {})",
            i + 1
        )));
    }

    Ok(out)
}

/// Lit un nombre à partir de `start` : chiffres [. chiffres] [(e|E) [+|-] chiffres].
/// Renvoie (valeur, indice après le nombre).
fn lire_nombre(chars: &[char], start: usize) -> Result<(f64, usize), CalcError> {
    let chiffres = |mut j: usize| {
        while j < chars.len() && chars[j].is_ascii_digit() {
            j += 1;
        }
        j
    };

    let mut i = chiffres(start);

    if i < chars.len() && chars[i] == '.' {
        i = chiffres(i + 1);
    }

    // exposant seulement s’il est complet (sinon "2e" laisse 'e' à l’identifiant)
    if i < chars.len() && (chars[i] == 'e' || chars[i] == 'E') {
        let mut j = i + 1;
        if j < chars.len() && (chars[j] == '+' || chars[j] == '-') {
            j += 1;
        }
        if j < chars.len() && chars[j].is_ascii_digit() {
            i = chiffres(j);
        }
    }

    let texte: String = chars[start..i].iter().collect();
    let n = texte
        .parse::<f64>()
        .map_err(|_| CalcError::invalide(format!("nombre invalide '{texte}'")))?;
    Ok((n, i))
}

/// Format utilitaire (traces / “démarche”) : liste de jetons en texte.
pub fn format_tokens(tokens: &[Tok]) -> String {
    let mut out = Vec::with_capacity(tokens.len());
    for t in tokens {
        let s = match t {
            Tok::Num(n) => format!("{n}"),
            Tok::Ident(name) => name.clone(),

            Tok::Plus => "+".to_string(),
            Tok::Minus => "-".to_string(),
            Tok::Star => "*".to_string(),
            Tok::Slash => "/".to_string(),
            Tok::Caret => "^".to_string(),

            Tok::Comma => ",".to_string(),
            Tok::LPar => "(".to_string(),
            Tok::RPar => ")".to_string(),
        };
        out.push(s);
    }
    out.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::noyau::erreur::CalcErrorKind;

    fn ident(s: &str) -> Tok {
        Tok::Ident(s.to_string())
    }

    #[test]
    fn nombres() {
        assert_eq!(tokenize("12").unwrap(), vec![Tok::Num(12.0)]);
        assert_eq!(tokenize("3.25").unwrap(), vec![Tok::Num(3.25)]);
        assert_eq!(tokenize(".5").unwrap(), vec![Tok::Num(0.5)]);
        assert_eq!(tokenize("1e-3").unwrap(), vec![Tok::Num(0.001)]);
        assert_eq!(tokenize("2.5E+2").unwrap(), vec![Tok::Num(250.0)]);
        assert_eq!(tokenize("7.").unwrap(), vec![Tok::Num(7.0)]);
    }

    #[test]
    fn exposant_incomplet_laisse_l_identifiant() {
        assert_eq!(tokenize("2e").unwrap(), vec![Tok::Num(2.0), ident("e")]);
        assert_eq!(
            tokenize("2ex").unwrap(),
            vec![Tok::Num(2.0), ident("ex")]
        );
    }

    #[test]
    fn operateurs_et_double_etoile() {
        assert_eq!(
            tokenize("x**3 + 2*x").unwrap(),
            vec![
                ident("x"),
                Tok::Caret,
                Tok::Num(3.0),
                Tok::Plus,
                Tok::Num(2.0),
                Tok::Star,
                ident("x"),
            ]
        );
        assert_eq!(
            tokenize("2^3").unwrap(),
            vec![Tok::Num(2.0), Tok::Caret, Tok::Num(3.0)]
        );
    }

    #[test]
    fn appel_avec_virgule() {
        assert_eq!(
            tokenize("log(100, 10)").unwrap(),
            vec![
                ident("log"),
                Tok::LPar,
                Tok::Num(100.0),
                Tok::Comma,
                Tok::Num(10.0),
                Tok::RPar,
            ]
        );
    }

    #[test]
    fn symboles_unicode() {
        assert_eq!(
            tokenize("√4 × π").unwrap(),
            vec![ident("sqrt"), Tok::Num(4.0), Tok::Star, ident("π")]
        );
    }

    #[test]
    fn casse_conservee() {
        assert_eq!(tokenize("SIN").unwrap(), vec![ident("SIN")]);
    }

    #[test]
    fn caractere_inattendu() {
        let err = tokenize("2 $ 3").unwrap_err();
        assert_eq!(err.kind(), CalcErrorKind::InvalidExpression);
        assert!(err.to_string().contains('$'));
    }

    #[test]
    fn format_lisible() {
        let t = tokenize("sin(pi/2)").unwrap();
        assert_eq!(format_tokens(&t), "sin ( pi / 2 )");
    }
}
