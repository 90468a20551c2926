use bitvec::order::Msb0;
use bitvec::view::BitView;
use pretty_assertions_sorted::assert_eq;

use crate::algebra::curve::{AffinePoint, ProjectivePoint, CURVE_G, CURVE_ORDER};
use crate::algebra::field::{CurveOrderFieldElement, FieldElement};

fn g_double() -> AffinePoint {
    AffinePoint::from_hex(
        "759CA09377679ECD535A81E83039658BF40959283187C654C5416F439403CF5",
        "6F524A3400E7708D5C01A28598AD272E7455AA88778B19F93B562D7A9646C41",
    )
    .unwrap()
}

fn g_triple() -> AffinePoint {
    AffinePoint::from_hex(
        "411494B501A98ABD8262B0DA1351E17899A0C4EF23DD2F96FEC5BA847310B20",
        "7E1B3EBAC08924D2C26F409549191FCF94F3BF6F301ED3553E22DFB802F0686",
    )
    .unwrap()
}

#[test]
fn generator_is_on_curve() {
    assert!(CURVE_G.is_on_curve());
    assert!(g_double().is_on_curve());
    assert!(!AffinePoint {
        x: CURVE_G.x.clone(),
        y: CURVE_G.y.double(),
        infinity: false,
    }
    .is_on_curve());
}

#[test]
fn affine_projective_multiply() {
    let three = [3u8];
    let three = three.view_bits::<Msb0>();

    let ag = CURVE_G.clone();
    let ag_triple = ag.multiply(three);

    let pg = ProjectivePoint::from(&ag);
    let pg_triple = pg.multiply(three);

    let result = AffinePoint::from(&pg_triple);
    assert_eq!(ag_triple, result);
}

#[test]
fn affine_double() {
    let g_double_computed = {
        let mut g = CURVE_G.clone();
        g.double();
        g
    };
    assert_eq!(g_double_computed, g_double());
}

#[test]
fn projective_double() {
    let g_double_computed = {
        let mut g = ProjectivePoint::from(&*CURVE_G);
        g.double();
        AffinePoint::from(&g)
    };
    assert_eq!(g_double_computed, g_double());
}

#[test]
fn projective_double_and_add() {
    let g_triple_computed = {
        let g = ProjectivePoint::from(&*CURVE_G);
        let mut acc = g.clone();
        acc.double();
        acc.add(&g);
        AffinePoint::from(&acc)
    };
    assert_eq!(g_triple_computed, g_triple());
}

#[test]
fn affine_add() {
    let mut acc = g_double();
    acc.add(&CURVE_G);
    assert_eq!(acc, g_triple());
}

#[test]
fn projective_multiply() {
    let seven = CurveOrderFieldElement::from_u64(7);
    let expected = AffinePoint::from_hex(
        "743829e0a179f8afe223fc8112dfc8d024ab6b235fd42283c4f5970259ce7b7",
        "e67a0a63cc493225e45b9178a3375596ea2a1d7012628a328dbc14c78cd1b7",
    )
    .unwrap();
    assert_eq!(AffinePoint::gen_multiply_elm(&seven), expected);
}

#[test]
fn adding_the_negation_gives_identity() {
    let g = ProjectivePoint::from(&*CURVE_G);
    let mut minus_g = g.clone();
    minus_g.negate();

    let mut acc = g;
    acc.add(&minus_g);
    assert!(acc.infinity);
    assert_eq!(AffinePoint::from(&acc), AffinePoint::identity());
}

#[test]
fn order_minus_one_is_negated_generator() {
    let n_minus_one = CurveOrderFieldElement::zero() - CurveOrderFieldElement::one();
    let mut expected = CURVE_G.clone();
    expected.negate();
    assert_eq!(AffinePoint::gen_multiply_elm(&n_minus_one), expected);
}

#[test]
fn multiplying_by_order_gives_identity() {
    let bytes = CURVE_ORDER.to_bytes_be();
    let product = ProjectivePoint::from(&*CURVE_G).multiply(bytes.view_bits::<Msb0>());
    assert!(product.infinity);
}

#[test]
fn multiplying_by_zero_gives_identity() {
    let product = AffinePoint::gen_multiply_elm(&CurveOrderFieldElement::zero());
    assert_eq!(product, AffinePoint::identity());
}

#[test]
fn const_generator() {
    let expected = AffinePoint::from_hex(
        "1EF15C18599971B7BECED415A40F0C7DEACFD9B0D1819E03D723D8BC943CFCA",
        "5668060AA49730B7BE4801DF46EC62DE53ECD11ABE43A32873000C36E8DC1F",
    )
    .unwrap();
    assert_eq!(*CURVE_G, expected);
    assert_eq!(
        FieldElement::from_hex("0x1").unwrap(),
        FieldElement::one()
    );
}
