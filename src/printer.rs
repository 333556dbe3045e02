//! LaTeX pretty-printer for canonical gamma-matrix expressions.
//!
//! Grounded on `ExprPrinter.{hpp,cpp}`.

use crate::complex::Complex;
use crate::gamma::reduce::CanonicalExpr;
use crate::index::{IndexId, TensorIndex};
use crate::li::{self, TensorPolynomial};
use crate::scalar::Scalar;
use std::collections::HashMap;

const LEFT_BRACE: &str = "{";
const RIGHT_BRACE: &str = "}";
const HAT: &str = "^";
const SUBS: &str = "_";
const LEFT_SQUARE: &str = "\\left[";
const RIGHT_SQUARE: &str = "\\right]";
const LEFT_PAREN: &str = "\\left(";
const RIGHT_PAREN: &str = "\\right)";

/// One rendered polynomial term: a join sign (`"+"` or `""`, a bare `"-"`
/// already folded into `body`) and its LaTeX body.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LatexTerm {
    pub sign: String,
    pub body: String,
}

impl LatexTerm {
    fn new(sign: impl Into<String>, body: impl Into<String>) -> Self {
        LatexTerm {
            sign: sign.into(),
            body: body.into(),
        }
    }
}

pub type LatexTerms = Vec<LatexTerm>;
pub type TermGroups = Vec<LatexTerms>;

/// Joins rendered terms into one LaTeX string, skipping empty bodies.
pub fn join(terms: &[LatexTerm]) -> String {
    let mut out = String::new();
    let mut first = true;
    for term in terms {
        if term.body.is_empty() {
            continue;
        }
        if first {
            first = false;
        } else {
            out.push(' ');
            out.push_str(&term.sign);
            out.push(' ');
        }
        out.push_str(&term.body);
    }
    out
}

/// The join sign a coefficient contributes: `"+"` when it should read as an
/// addition, `""` when a leading `-` is folded directly into the body instead.
fn sign<S: Scalar>(c: &Complex<S>) -> String {
    if !c.re.is_zero() && !c.im.is_zero() {
        "+".to_string()
    } else if c.im.is_zero() {
        if c.re > S::zero() {
            "+".to_string()
        } else {
            String::new()
        }
    } else if c.im > S::zero() {
        "+".to_string()
    } else {
        String::new()
    }
}

/// Renders canonical expressions, LI tensors, and scalars to LaTeX, tracking
/// a stable name for every internally-generated dummy index it encounters.
pub struct ExprPrinter<S: Scalar> {
    dummy_index_name: String,
    line_size: usize,
    index_tag_map: HashMap<(i64, i64), String>,
    _scalar: std::marker::PhantomData<S>,
}

impl<S: Scalar> ExprPrinter<S> {
    pub fn new(dummy_index_name: impl Into<String>, line_size: usize) -> Self {
        ExprPrinter {
            dummy_index_name: dummy_index_name.into(),
            line_size,
            index_tag_map: HashMap::new(),
            _scalar: std::marker::PhantomData,
        }
    }

    /// A string index id passes through; a generated `(generation, slot)` tag
    /// is mapped to `\dummyName_{1}`, `\dummyName_{2}`, ... in first-seen order.
    pub fn map_index_id(&mut self, id: &IndexId) -> String {
        match id {
            IndexId::Named(name) => name.clone(),
            IndexId::Tag(gen, slot) => {
                let key = (*gen, *slot);
                if let Some(s) = self.index_tag_map.get(&key) {
                    return s.clone();
                }
                let n = self.index_tag_map.len() + 1;
                let mapped = format!("{}_{{{n}}}", self.dummy_index_name);
                self.index_tag_map.insert(key, mapped.clone());
                mapped
            }
        }
    }

    /// Renders a tensor head with its indices, grouping adjacent same-variance
    /// indices into one `_{...}`/`^{...}` fragment each.
    pub fn latexify_head(&mut self, head: &str, indices: &[TensorIndex]) -> String {
        let mut frags: Vec<(bool, String)> = Vec::new();
        for idx in indices {
            let needs_new = match frags.last() {
                None => true,
                Some((upper, _)) => *upper != idx.upper,
            };
            if needs_new {
                frags.push((idx.upper, String::new()));
            }
            let frag = frags.last_mut().expect("just pushed if empty");
            frag.1.push_str(&self.map_index_id(&idx.id));
        }

        let mut value = head.to_string();
        let mut first = true;
        for (upper, body) in frags {
            if first {
                first = false;
            } else {
                value = format!("{LEFT_BRACE}{value}{RIGHT_BRACE}");
            }
            let marker = if upper { HAT } else { SUBS };
            value = format!("{value}{marker}{LEFT_BRACE}{body}{RIGHT_BRACE}");
        }
        value
    }

    pub fn latexify_tensor(&mut self, t: &li::Tensor) -> String {
        let head = t.id().to_string();
        self.latexify_head(&head, t.indices())
    }

    pub fn latexify_scalar(&self, s: &S) -> String {
        s.to_latex()
    }

    pub fn latexify_complex(&self, c: &Complex<S>) -> String {
        let has_real = !c.re.is_zero();
        let has_imag = !c.im.is_zero();

        let mut value = String::new();
        if has_real {
            value.push_str(&self.latexify_scalar(&c.re));
        }
        if has_real && c.im > S::zero() {
            value.push_str(" + ");
        } else if has_real && c.im < S::zero() {
            value.push_str(" - ");
        }
        if has_imag {
            let im_abs = if c.im < S::zero() { -c.im } else { c.im };
            if !has_real && c.im < S::zero() {
                value.push('-');
            }
            if im_abs == S::one() {
                value.push('I');
            } else {
                value.push_str(&self.latexify_scalar(&im_abs));
                value.push('I');
            }
        }
        value
    }

    /// Renders an LI tensor polynomial as one [`LatexTerm`] per nonzero term.
    pub fn latexify_poly(&mut self, poly: &TensorPolynomial<S>) -> LatexTerms {
        let mut latex = LatexTerms::with_capacity(poly.terms.len());
        for term in &poly.terms {
            if term.coeff.is_zero() {
                continue;
            }

            let mut body = String::new();
            for factor in &term.factors {
                body.push_str(&self.latexify_tensor(factor));
            }

            let term_sign = sign(&term.coeff);

            if term.coeff == Complex::one() {
                latex.push(LatexTerm::new(term_sign, body));
                continue;
            }
            if term.coeff == -Complex::one() {
                latex.push(LatexTerm::new(term_sign, format!("-{body}")));
                continue;
            }

            let mut coeff = self.latexify_complex(&term.coeff);
            if !term.coeff.re.is_zero() && !term.coeff.im.is_zero() {
                coeff = format!("{LEFT_PAREN}{coeff}{RIGHT_PAREN}");
            }
            latex.push(LatexTerm::new(term_sign, format!("{coeff}{body}")));
        }
        latex
    }

    /// Flattens term groups into one string, inserting `split`-environment
    /// line breaks every `line_size` terms when `line_size > 0`.
    pub fn latexify_groups(&self, groups: TermGroups) -> String {
        let mut all_terms = LatexTerms::new();
        let mut term_count = 0usize;

        for (i, group) in groups.iter().enumerate() {
            for (j, term) in group.iter().enumerate() {
                let mut term = term.clone();
                if self.line_size > 0 {
                    if term_count == 0 {
                        term.body = format!("&{}", term.body);
                    } else if term_count % self.line_size == 0 {
                        let line_break = if !group.is_empty() && j > 0 && i > 0 {
                            "\\right.\\\\\n&\\left."
                        } else {
                            "\\\\\n&"
                        };
                        if term.sign.is_empty() {
                            term.body = format!("-{line_break}{}", term.body);
                        } else {
                            term.body = format!("{line_break}{}{}", term.sign, term.body);
                        }
                    }
                }
                all_terms.push(term);
                term_count += 1;
            }
        }

        if all_terms.is_empty() {
            return "0".to_string();
        }
        join(&all_terms)
    }

    /// Main entry point: renders a canonical expression to LaTeX.
    pub fn latexify(&mut self, expr: &CanonicalExpr<S>) -> String {
        if expr.is_zero() {
            return "0".to_string();
        }
        if expr.is_scalar(Complex::one()) {
            return "1".to_string();
        }
        if expr.is_scalar(-Complex::one()) {
            return "-1".to_string();
        }

        let mut groups: TermGroups = expr.coeffs.iter().map(|c| self.latexify_poly(c)).collect();

        for group in groups.iter_mut().skip(1) {
            if group.len() > 1 {
                let first = group.first_mut().expect("len > 1");
                first.body = format!("{LEFT_SQUARE}{}", first.body);
                first.sign = "+".to_string();
                let last = group.last_mut().expect("len > 1");
                last.body = format!("{}{RIGHT_SQUARE}", last.body);
            }
        }

        if let Some(last) = groups[1].last_mut() {
            let suffix = self.latexify_head("\\gamma", std::slice::from_ref(&expr.vector_index));
            last.body.push_str(&suffix);
        }
        if let Some(last) = groups[2].last_mut() {
            let suffix = self.latexify_head(
                "\\sigma",
                &[expr.tensor_indices.0.clone(), expr.tensor_indices.1.clone()],
            );
            last.body.push_str(&suffix);
        }
        if let Some(last) = groups[3].last_mut() {
            let suffix = self.latexify_head("\\gamma", std::slice::from_ref(&expr.pseudo_vector_index));
            last.body.push_str(&format!("\\gamma^5{suffix}"));
        }
        if let Some(last) = groups[4].last_mut() {
            last.body.push_str("\\gamma^5");
        }

        self.latexify_groups(groups)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rational::Rational;

    #[test]
    fn zero_expr_prints_as_zero() {
        let expr: CanonicalExpr<Rational> = CanonicalExpr::zero();
        let mut p = ExprPrinter::new("\\omega", 0);
        assert_eq!(p.latexify(&expr), "0");
    }

    #[test]
    fn scalar_one_prints_as_one() {
        let expr = CanonicalExpr::<Rational>::from_scalar(Complex::one());
        let mut p = ExprPrinter::new("\\omega", 0);
        assert_eq!(p.latexify(&expr), "1");
    }

    #[test]
    fn scalar_five_prints_bare_number() {
        let expr = CanonicalExpr::<Rational>::from_scalar(Complex::real(Rational::from_int(5)));
        let mut p = ExprPrinter::new("\\omega", 0);
        assert_eq!(p.latexify(&expr), "5");
    }

    #[test]
    fn fraction_scalar_uses_frac_macro() {
        let half = Rational::new(1, 2);
        assert_eq!(half.to_latex(), "\\frac{1}{2}");
    }

    #[test]
    fn dummy_tags_are_numbered_in_first_seen_order() {
        let mut p: ExprPrinter<Rational> = ExprPrinter::new("\\omega", 0);
        let a = p.map_index_id(&IndexId::Tag(3, 0));
        let b = p.map_index_id(&IndexId::Tag(7, 1));
        let a_again = p.map_index_id(&IndexId::Tag(3, 0));
        assert_eq!(a, "\\omega_{1}");
        assert_eq!(b, "\\omega_{2}");
        assert_eq!(a_again, a);
    }
}
