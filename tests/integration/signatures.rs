// tests/integration/signatures.rs
//! Integration tests for ECDSA over the built-in curves: regression vectors, a
//! known-answer signature, boundary rejection and tamper detection.

use miniecdsa::{
    curves::{Curve, Point},
    errors::EcdsaError,
    params::{CurveId, CurveParams},
    protocols::{
        digest::{hash_to_integer, Sha256Digest},
        ecdsa::{self, Signature, VerificationOutcome},
        keys::{public_key_from_private, PrivateKey, PublicKey},
        nonce::{AuxiliaryPointNonce, SystemRandomNonce},
    },
};
use proptest::prelude::*;
use rug::Integer;

fn hex(value: &str) -> Integer {
    Integer::from_str_radix(value, 16).expect("valid hex literal")
}

/// Fixture bundling the secp256r1 curve with a recorded key and two signatures
struct SignatureFixture {
    params: &'static CurveParams,
    curve: Curve<'static>,
    public_key: Point,
    vectors: Vec<(Integer, Signature)>,
}

impl SignatureFixture {
    fn new() -> Self {
        let params = CurveParams::global();
        let public_key = Point::affine(
            hex("209d386328994af4bbf0ff8bb6cdbb0e87e01e2118b1c12b94c555a1726129c6"),
            hex("76ac8f2fda3a921bd3dcc1d2f0741b91dcd18d053a67a4ece89761e64a0881b1"),
        );
        let vectors = vec![
            (
                hex("ca1ad489ab60ea581e6c119cc39d94ddbfc5faa0e178a23ca66202c8c2a72277"),
                Signature::new(
                    hex("22c2921acf3a393a0bbaf1f68ee7e02f8385ff60ca67c41a1de3cff3fdaa1a74"),
                    hex("1878dbc4684de3a63a5975325b467cdba846b24d949322016fe4c8fd2c0862a1"),
                ),
            ),
            (
                hex("0f1ae6c77fee73f3ac9be1217f50c576c07d7e5faa0e178a232dd33d09ff2cde"),
                Signature::new(
                    hex("b9201d2d40d63eb41d934c9d45280837ca09b03c4e063946caa06eabeaacb944"),
                    hex("ba69f449ed11e3677ab37367d99ec3b399a006fe875941f5da57156a8fe9c8e0"),
                ),
            ),
        ];
        Self {
            params,
            curve: Curve::new(params),
            public_key,
            vectors,
        }
    }
}

#[test]
fn test_recorded_signatures_verify() {
    let fixture = SignatureFixture::new();

    assert!(ecdsa::is_on_curve(&fixture.curve, &fixture.public_key));
    for (msg_hash, signature) in &fixture.vectors {
        assert!(
            ecdsa::verify(&fixture.curve, &fixture.public_key, msg_hash, signature),
            "recorded signature must verify"
        );
    }
}

#[test]
fn test_recorded_signatures_are_not_interchangeable() {
    let fixture = SignatureFixture::new();
    let (first_hash, _) = &fixture.vectors[0];
    let (_, second_sig) = &fixture.vectors[1];

    assert_eq!(
        ecdsa::verify_detailed(&fixture.curve, &fixture.public_key, first_hash, second_sig),
        Ok(VerificationOutcome::SignatureMismatch)
    );
}

#[test]
fn test_known_answer_signature() {
    let fixture = SignatureFixture::new();
    let private_key = PrivateKey::from_integer(
        fixture.params,
        &hex("1d3c5a7e9b2f4c6d8e0a1b3c5d7e9f0a2b4c6d8e0f1a3b5c7d9e0f2a4b6c8d0e"),
    )
    .expect("valid private key");
    let msg_hash = &fixture.vectors[0].0;

    let public = public_key_from_private(&fixture.curve, &private_key.scalar())
        .expect("public key derivation");
    assert_eq!(
        public.x(),
        Some(&hex("5ac8ce0d62b4ea32568639dbdafb20ce24eb75d54f5fe549622cf655153f8faa"))
    );

    let signature = ecdsa::sign(&fixture.curve, &private_key, msg_hash).expect("signature");
    assert_eq!(
        signature,
        Signature::new(
            hex("12689ef9264b48de40389ba2ac961457185f0f6829404c37658b466ccfbd2943"),
            hex("7a7df18935bce4ed701d59ecf0164b9f8d9eb2d68a47473ed418a777cdf30847"),
        )
    );

    // Deterministic nonce: signing twice yields the same signature
    let again = ecdsa::sign(&fixture.curve, &private_key, msg_hash).expect("signature");
    assert_eq!(signature, again);
    assert!(ecdsa::verify(&fixture.curve, &public, msg_hash, &signature));
}

#[test]
fn test_out_of_range_components_rejected() {
    let fixture = SignatureFixture::new();
    let (msg_hash, signature) = &fixture.vectors[0];
    let n = &fixture.params.n;

    let candidates = [
        Signature::new(Integer::new(), signature.s().clone()),
        Signature::new(signature.r().clone(), Integer::new()),
        Signature::new(n.clone(), signature.s().clone()),
        Signature::new(signature.r().clone(), n.clone()),
        Signature::new(Integer::from(signature.r() + n), signature.s().clone()),
        Signature::new(Integer::from(-1), signature.s().clone()),
    ];
    for candidate in &candidates {
        assert_eq!(
            ecdsa::verify_detailed(&fixture.curve, &fixture.public_key, msg_hash, candidate),
            Ok(VerificationOutcome::InvalidSignatureRange),
            "component outside [1, n) must be rejected before any curve arithmetic"
        );
        assert!(!ecdsa::verify(&fixture.curve, &fixture.public_key, msg_hash, candidate));
    }
}

#[test]
fn test_tampered_inputs_rejected() {
    let fixture = SignatureFixture::new();
    let (msg_hash, signature) = &fixture.vectors[0];
    let curve = &fixture.curve;

    let other_hash = Integer::from(msg_hash ^ 1);
    assert!(!ecdsa::verify(curve, &fixture.public_key, &other_hash, signature));

    let bumped_r = Signature::new(Integer::from(signature.r() + 1), signature.s().clone());
    assert!(!ecdsa::verify(curve, &fixture.public_key, msg_hash, &bumped_r));

    let bumped_s = Signature::new(signature.r().clone(), Integer::from(signature.s() + 1));
    assert!(!ecdsa::verify(curve, &fixture.public_key, msg_hash, &bumped_s));

    let negated_key = curve.ec_neg(&fixture.public_key);
    assert!(!ecdsa::verify(curve, &negated_key, msg_hash, signature));

    let off_curve = match &fixture.public_key {
        Point::Affine { x, y } => Point::affine(x.clone(), Integer::from(y + 1)),
        Point::Identity => unreachable!("fixture key is affine"),
    };
    assert_eq!(
        ecdsa::verify_detailed(curve, &off_curve, msg_hash, signature),
        Ok(VerificationOutcome::InvalidPublicKey)
    );
}

#[test]
fn test_identity_public_key_rejected() {
    let fixture = SignatureFixture::new();
    let (msg_hash, signature) = &fixture.vectors[0];

    assert!(!ecdsa::is_on_curve(&fixture.curve, &Point::Identity));
    assert!(!ecdsa::verify(&fixture.curve, &Point::Identity, msg_hash, signature));
    assert!(matches!(
        PublicKey::from_point(&fixture.curve, Point::from_legacy(Integer::new(), Integer::new())),
        Err(EcdsaError::InvalidPoint { .. })
    ));
}

#[test]
fn test_batch_matches_individual_verification() {
    let fixture = SignatureFixture::new();
    let mut items: Vec<(Point, Integer, Signature)> = fixture
        .vectors
        .iter()
        .map(|(h, sig)| (fixture.public_key.clone(), h.clone(), sig.clone()))
        .collect();
    items.push((
        fixture.public_key.clone(),
        fixture.vectors[0].0.clone(),
        fixture.vectors[1].1.clone(),
    ));

    let expected: Vec<bool> = items
        .iter()
        .map(|(q, h, sig)| ecdsa::verify(&fixture.curve, q, h, sig))
        .collect();
    assert_eq!(expected, vec![true, true, false]);
    assert_eq!(ecdsa::verify_batch(&fixture.curve, &items), expected);
}

#[test]
fn test_secp256k1_with_random_nonce() {
    let params = CurveId::Secp256k1.params();
    let curve = Curve::new(&params);
    let private_key = PrivateKey::generate(&params).expect("entropy available");
    let public = private_key.public_key(&curve).expect("public key");
    let msg_hash = hash_to_integer(&Sha256Digest, &params, b"secp256k1 message");

    // The secp256r1 auxiliary points do not lie on this curve
    assert!(matches!(
        ecdsa::sign(&curve, &private_key, &msg_hash),
        Err(EcdsaError::InvalidPoint { .. })
    ));

    let signature =
        ecdsa::sign_with(&curve, &private_key, &msg_hash, &SystemRandomNonce).expect("signature");
    assert!(ecdsa::verify(&curve, public.point(), &msg_hash, &signature));

    let g = curve.generator().clone();
    let three_g = curve.mult(&g, &Integer::from(3)).expect("3G");
    let custom = AuxiliaryPointNonce::new(&curve, g, three_g).expect("points on secp256k1");
    let deterministic =
        ecdsa::sign_with(&curve, &private_key, &msg_hash, &custom).expect("signature");
    assert!(ecdsa::verify(&curve, public.point(), &msg_hash, &deterministic));
}

#[test]
fn test_signature_encoding_round_trip() {
    let fixture = SignatureFixture::new();
    let (msg_hash, signature) = &fixture.vectors[1];

    let bytes = signature.to_bytes(fixture.params).expect("encodable");
    let decoded = Signature::from_bytes(fixture.params, &bytes).expect("decodable");
    assert!(ecdsa::verify(&fixture.curve, &fixture.public_key, msg_hash, &decoded));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(6))]

    #[test]
    fn test_messages_sign_and_verify(message in proptest::collection::vec(any::<u8>(), 0..128)) {
        let fixture = SignatureFixture::new();
        let private_key = PrivateKey::generate(fixture.params).expect("entropy available");
        let public = private_key.public_key(&fixture.curve).expect("public key");
        let msg_hash = hash_to_integer(&Sha256Digest, fixture.params, &message);

        let signature = ecdsa::sign(&fixture.curve, &private_key, &msg_hash).expect("signature");
        prop_assert!(ecdsa::verify(&fixture.curve, public.point(), &msg_hash, &signature));

        let mut altered = message.clone();
        altered.push(0x5a);
        let altered_hash = hash_to_integer(&Sha256Digest, fixture.params, &altered);
        prop_assert!(!ecdsa::verify(&fixture.curve, public.point(), &altered_hash, &signature));
    }
}
