// src/noyau/expr.rs
//
// Arbre syntaxique (fermé) produit par rpn::from_rpn.
// - Num   : littéral flottant
// - Ident : constante (pi, e) ou variable (polynôme)
// - Unary / Binary : opérateurs
// - Call  : appel de fonction nommé, arguments ordonnés
//
// Toute consommation fait un match exhaustif : une nouvelle variante casse la
// compilation partout où elle doit être traitée.

use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UnaryOp {
    Neg,
    Plus,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
}

impl BinaryOp {
    pub fn symbole(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Pow => "^",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    Num(f64),
    Ident(String),
    Unary(UnaryOp, Box<Expr>),
    Binary(BinaryOp, Box<Expr>, Box<Expr>),
    Call(String, Vec<Expr>),
}

impl Expr {
    pub fn unary(op: UnaryOp, x: Expr) -> Expr {
        Expr::Unary(op, Box::new(x))
    }

    pub fn binary(op: BinaryOp, a: Expr, b: Expr) -> Expr {
        Expr::Binary(op, Box::new(a), Box::new(b))
    }
}

/// Affichage entièrement parenthésé (non ambigu, utile pour la démarche).
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Num(n) => write!(f, "{n}"),
            Expr::Ident(name) => f.write_str(name),
            Expr::Unary(UnaryOp::Neg, x) => write!(f, "(-{x})"),
            Expr::Unary(UnaryOp::Plus, x) => write!(f, "(+{x})"),
            Expr::Binary(op, a, b) => write!(f, "({a} {} {b})", op.symbole()),
            Expr::Call(name, args) => {
                write!(f, "{name}(")?;
                for (k, a) in args.iter().enumerate() {
                    if k > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{a}")?;
                }
                f.write_str(")")
            }
        }
    }
}
