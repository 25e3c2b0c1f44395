// src/noyau/rpn.rs
//
// Shunting-yard -> RPN -> AST
// Objectif:
// - Convertir une suite de Tok en RPN (postfix)
// - Puis reconstruire Expr
//
// Règles:
// - Ident(name) suivi de '(' => appel de fonction (arguments séparés par ',')
// - Ident(name) seul         => atome (constante ou variable)
// - '+'/'-' quand on n’attend PAS une valeur => opérateur unaire
// - Précédences : + - (1) < * / (2) < unaire (3) < ^ (4, associatif à droite)
//   donc -2^2 = -(2^2) et 2^-1 = 2^(-1)
// - Pas de multiplication implicite : deux valeurs adjacentes sont refusées.

use super::erreur::CalcError;
use super::expr::{BinaryOp, Expr, UnaryOp};
use super::jetons::{format_tokens, Tok};

/// Élément de sortie RPN.
#[derive(Clone, Debug, PartialEq)]
pub enum Rpn {
    Num(f64),
    Ident(String),
    Unary(UnaryOp),
    Binary(BinaryOp),
    /// Appel : nom + nombre d’arguments déjà empilés.
    Call(String, usize),
}

/// Élément de la pile d’opérateurs.
enum Op {
    Unary(UnaryOp),
    Binary(BinaryOp),
    /// '(' de groupement
    Paren,
    /// 'nom(' : ouvre un appel ; compte les virgules rencontrées
    Appel { name: String, virgules: usize },
}

const PREC_UNAIRE: u8 = 3;

fn precedence(op: BinaryOp) -> u8 {
    match op {
        BinaryOp::Add | BinaryOp::Sub => 1,
        BinaryOp::Mul | BinaryOp::Div => 2,
        BinaryOp::Pow => 4,
    }
}

fn is_right_associative(op: BinaryOp) -> bool {
    matches!(op, BinaryOp::Pow)
}

fn binaire(tok: &Tok) -> Option<BinaryOp> {
    match tok {
        Tok::Plus => Some(BinaryOp::Add),
        Tok::Minus => Some(BinaryOp::Sub),
        Tok::Star => Some(BinaryOp::Mul),
        Tok::Slash => Some(BinaryOp::Div),
        Tok::Caret => Some(BinaryOp::Pow),
        _ => None,
    }
}

fn inattendu(tok: &Tok) -> CalcError {
    CalcError::invalide(format!(
        "'{}' inattendu",
        format_tokens(std::slice::from_ref(tok))
    ))
}

/// Convertit une suite de jetons en RPN (notation polonaise inversée).
///
/// Exemple:
///   tokens: [Ident("log"), LPar, Num(100), Comma, Num(10), RPar]
///   rpn:    [Num(100), Num(10), Call("log", 2)]
pub fn to_rpn(tokens: &[Tok]) -> Result<Vec<Rpn>, CalcError> {
    let mut out: Vec<Rpn> = Vec::with_capacity(tokens.len());
    let mut ops: Vec<Op> = Vec::new();

    // “valeur” = un atome ou une expression fermée.
    // Sert à détecter les unaires et les juxtapositions interdites.
    let mut prev_was_value = false;

    let mut it = tokens.iter().peekable();
    while let Some(tok) = it.next() {
        match tok {
            Tok::Num(n) => {
                if prev_was_value {
                    return Err(inattendu(tok));
                }
                out.push(Rpn::Num(*n));
                prev_was_value = true;
            }

            Tok::Ident(name) => {
                if prev_was_value {
                    return Err(inattendu(tok));
                }
                if matches!(it.peek(), Some(Tok::LPar)) {
                    // appel : la '(' est absorbée par l’entrée Appel
                    it.next();
                    ops.push(Op::Appel {
                        name: name.clone(),
                        virgules: 0,
                    });
                    prev_was_value = false;
                } else {
                    out.push(Rpn::Ident(name.clone()));
                    prev_was_value = true;
                }
            }

            Tok::LPar => {
                if prev_was_value {
                    return Err(inattendu(tok));
                }
                ops.push(Op::Paren);
            }

            Tok::Comma => {
                if !prev_was_value {
                    return Err(CalcError::invalide("argument vide"));
                }
                loop {
                    match ops.last() {
                        Some(Op::Appel { .. }) => break,
                        Some(Op::Paren) | None => {
                            return Err(CalcError::invalide("',' en dehors d’un appel de fonction"))
                        }
                        Some(_) => depile(&mut ops, &mut out),
                    }
                }
                if let Some(Op::Appel { virgules, .. }) = ops.last_mut() {
                    *virgules += 1;
                }
                prev_was_value = false;
            }

            Tok::RPar => {
                loop {
                    match ops.pop() {
                        Some(Op::Paren) => {
                            if !prev_was_value {
                                return Err(CalcError::invalide("parenthèses vides"));
                            }
                            break;
                        }
                        Some(Op::Appel { name, virgules }) => {
                            let n = match (prev_was_value, virgules) {
                                (true, v) => v + 1,
                                (false, 0) => 0, // f()
                                (false, _) => return Err(CalcError::invalide("argument vide")),
                            };
                            out.push(Rpn::Call(name, n));
                            break;
                        }
                        Some(Op::Unary(u)) => out.push(Rpn::Unary(u)),
                        Some(Op::Binary(b)) => out.push(Rpn::Binary(b)),
                        None => return Err(CalcError::invalide("')' sans '(' correspondante")),
                    }
                }
                prev_was_value = true;
            }

            Tok::Plus | Tok::Minus if !prev_was_value => {
                let u = if matches!(tok, Tok::Minus) {
                    UnaryOp::Neg
                } else {
                    UnaryOp::Plus
                };
                // préfixe : rien à dépiler
                ops.push(Op::Unary(u));
            }

            Tok::Plus | Tok::Minus | Tok::Star | Tok::Slash | Tok::Caret => {
                if !prev_was_value {
                    return Err(inattendu(tok));
                }
                let Some(op) = binaire(tok) else {
                    return Err(inattendu(tok));
                };

                // dépile tant que la précédence/associativité l’exige
                // (bloqué par '(' et par les appels)
                while let Some(top) = ops.last() {
                    let p_top = match top {
                        Op::Unary(_) => PREC_UNAIRE,
                        Op::Binary(b) => precedence(*b),
                        Op::Paren | Op::Appel { .. } => break,
                    };
                    let p_tok = precedence(op);

                    let doit_pop = if is_right_associative(op) {
                        p_top > p_tok
                    } else {
                        p_top >= p_tok
                    };

                    if doit_pop {
                        depile(&mut ops, &mut out);
                    } else {
                        break;
                    }
                }

                ops.push(Op::Binary(op));
                prev_was_value = false;
            }
        }
    }

    if !tokens.is_empty() && !prev_was_value {
        return Err(CalcError::invalide("expression incomplète"));
    }

    // vide la pile ops
    while let Some(op) = ops.pop() {
        match op {
            Op::Paren | Op::Appel { .. } => {
                return Err(CalcError::invalide("parenthèses non fermées"))
            }
            Op::Unary(u) => out.push(Rpn::Unary(u)),
            Op::Binary(b) => out.push(Rpn::Binary(b)),
        }
    }

    Ok(out)
}

/// Sort le sommet (opérateur) de la pile vers la sortie.
fn depile(ops: &mut Vec<Op>, out: &mut Vec<Rpn>) {
    match ops.pop() {
        Some(Op::Unary(u)) => out.push(Rpn::Unary(u)),
        Some(Op::Binary(b)) => out.push(Rpn::Binary(b)),
        // les appelants s’arrêtent avant '(' / appel
        Some(other @ (Op::Paren | Op::Appel { .. })) => ops.push(other),
        None => {}
    }
}

/// Garde-fous : évaluation, affichage et réduction polynomiale parcourent
/// l’arbre récursivement ; la profondeur doit rester bornée.
pub const PROFONDEUR_MAX: usize = 512;
pub const MAX_NOEUDS: usize = 200_000;

fn trop_profond() -> CalcError {
    CalcError::invalide(format!(
        "expression trop imbriquée (plus de {PROFONDEUR_MAX} niveaux)"
    ))
}

/// Construit une Expr à partir d’une RPN.
///
/// Chaque entrée de la pile porte la profondeur de son sous-arbre :
/// un arbre trop profond est refusé avant d’exister.
pub fn from_rpn(rpn: &[Rpn]) -> Result<Expr, CalcError> {
    if rpn.len() > MAX_NOEUDS {
        return Err(CalcError::invalide(format!(
            "expression trop longue (plus de {MAX_NOEUDS} éléments)"
        )));
    }

    let mut st: Vec<(Expr, usize)> = Vec::new();

    let manque = || CalcError::invalide("opérande manquant");

    for item in rpn.iter().cloned() {
        let (e, profondeur) = match item {
            Rpn::Num(n) => (Expr::Num(n), 1),
            Rpn::Ident(name) => (Expr::Ident(name), 1),

            Rpn::Unary(op) => {
                let (x, p) = st.pop().ok_or_else(manque)?;
                (Expr::unary(op, x), p + 1)
            }

            Rpn::Binary(op) => {
                let (b, pb) = st.pop().ok_or_else(manque)?;
                let (a, pa) = st.pop().ok_or_else(manque)?;
                (Expr::binary(op, a, b), pa.max(pb) + 1)
            }

            Rpn::Call(name, n) => {
                if st.len() < n {
                    return Err(manque());
                }
                let (args, profondeurs): (Vec<Expr>, Vec<usize>) =
                    st.split_off(st.len() - n).into_iter().unzip();
                let p = profondeurs.into_iter().max().unwrap_or(0);
                (Expr::Call(name, args), p + 1)
            }
        };

        if profondeur > PROFONDEUR_MAX {
            return Err(trop_profond());
        }
        st.push((e, profondeur));
    }

    match (st.pop(), st.is_empty()) {
        (Some((e, _)), true) => Ok(e),
        _ => Err(CalcError::invalide("expression invalide")),
    }
}

/// Format utilitaire (démarche) : RPN en texte.
pub fn format_rpn(rpn: &[Rpn]) -> String {
    let mut out = Vec::with_capacity(rpn.len());
    for item in rpn {
        let s = match item {
            Rpn::Num(n) => format!("{n}"),
            Rpn::Ident(name) => name.clone(),
            Rpn::Unary(UnaryOp::Neg) => "neg".to_string(),
            Rpn::Unary(UnaryOp::Plus) => "pos".to_string(),
            Rpn::Binary(op) => op.symbole().to_string(),
            Rpn::Call(name, n) => format!("{name}/{n}"),
        };
        out.push(s);
    }
    out.join(" ")
}

/// Raccourci : texte -> Expr (jetons puis RPN).
pub fn parse(s: &str) -> Result<Expr, CalcError> {
    let jetons = super::jetons::tokenize(s)?;
    let rpn = to_rpn(&jetons)?;
    from_rpn(&rpn)
}
