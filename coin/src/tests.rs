use super::*;
use field::BigUint;
use rand::SeedableRng;
use rand::rngs::StdRng;

fn small_params() -> GroupParameters {
    let dims = CircuitDimensions {
        columns: 4,
        rows: 4,
        serial_size: 8,
        pads: 2,
    };
    GroupParameters::new(
        BigUint::from(1_000_003u32),
        BigUint::from(2u32),
        BigUint::from(3u32),
        dims,
    )
    .expect("params")
}

#[test]
fn test_mint_opens() {
    let params = small_params();
    let mut rng = StdRng::seed_from_u64(42);
    for _ in 0..20 {
        let coin = PrivateCoin::mint(&params, &mut rng);
        assert!(coin.randomness().value().bits() <= 8);
        let public = coin.public_coin(&params);
        assert!(public.opens_to(&params, &coin));
    }
}

#[test]
fn test_commitment_matches_definition() {
    let params = small_params();
    let f = params.field();
    let coin = PrivateCoin::new(&params, f.from_u64(5), f.from_u64(170)).expect("coin");
    let expected = f.from_u64(2).pow_u64(5) * f.from_u64(3).pow_u64(170);
    assert_eq!(
        coin.public_coin(&params).value_in(&params).expect("reduced"),
        expected
    );
}

#[test]
fn test_randomness_bits_little_endian() {
    let params = small_params();
    let f = params.field();
    let coin = PrivateCoin::new(&params, f.from_u64(5), f.from_u64(170)).expect("coin");
    let mut bits = [true; 8];
    coin.randomness_bits(&mut bits);
    assert_eq!(bits, [false, true, false, true, false, true, false, true]);
}

#[test]
fn test_rejects_wide_randomness() {
    let params = small_params();
    let f = params.field();
    let err = PrivateCoin::new(&params, f.from_u64(5), f.from_u64(256)).unwrap_err();
    assert_eq!(
        err,
        CoinError::RandomnessTooWide {
            bits: 9,
            serial_size: 8
        }
    );
}

#[test]
fn test_rejects_foreign_elements() {
    let params = small_params();
    let other = field::PrimeField::new(BigUint::from(10_007u32)).expect("prime");
    let err = PrivateCoin::new(&params, other.from_u64(5), params.field().from_u64(1)).unwrap_err();
    assert_eq!(err, CoinError::ForeignElement);
}

#[test]
fn test_wrong_opening_rejected() {
    let params = small_params();
    let f = params.field();
    let coin = PrivateCoin::new(&params, f.from_u64(5), f.from_u64(170)).expect("coin");
    let other = PrivateCoin::new(&params, f.from_u64(5), f.from_u64(171)).expect("coin");
    assert!(!coin.public_coin(&params).opens_to(&params, &other));
}

#[test]
fn test_parameter_validation() {
    let dims = CircuitDimensions {
        columns: 4,
        rows: 4,
        serial_size: 8,
        pads: 2,
    };
    let q = BigUint::from(1_000_003u32);
    assert_eq!(
        GroupParameters::new(q.clone(), BigUint::from(1u32), BigUint::from(3u32), dims),
        Err(CoinError::GeneratorOutOfRange { name: "g" })
    );
    assert_eq!(
        GroupParameters::new(q.clone(), BigUint::from(2u32), q.clone(), dims),
        Err(CoinError::GeneratorOutOfRange { name: "h" })
    );
    assert!(matches!(
        GroupParameters::new(
            BigUint::from(1_000_001u32),
            BigUint::from(2u32),
            BigUint::from(3u32),
            dims
        ),
        Err(CoinError::Field(_))
    ));
    let empty = CircuitDimensions { rows: 0, ..dims };
    assert!(matches!(
        GroupParameters::new(q, BigUint::from(2u32), BigUint::from(3u32), empty),
        Err(CoinError::InvalidDimensions { .. })
    ));
}

#[test]
fn test_rejects_overflowing_dimensions() {
    let dims = CircuitDimensions {
        columns: usize::MAX,
        rows: 2,
        serial_size: 8,
        pads: 2,
    };
    assert_eq!(dims.capacity(), None);
    assert_eq!(
        GroupParameters::new(
            BigUint::from(1_000_003u32),
            BigUint::from(2u32),
            BigUint::from(3u32),
            dims
        ),
        Err(CoinError::InvalidDimensions {
            columns: usize::MAX,
            rows: 2,
            serial_size: 8
        })
    );

    // The same dimensions arriving over the wire are rejected on decode.
    let raw = params::RawParameters {
        modulus: BigUint::from(1_000_003u32),
        g: BigUint::from(2u32),
        h: BigUint::from(3u32),
        dimensions: dims,
    };
    let bytes = bincode::serialize(&raw).expect("encode");
    assert!(matches!(
        GroupParameters::from_bytes(&bytes),
        Err(CoinError::Encoding(_))
    ));
}

#[test]
fn test_parameters_survive_encoding() {
    let params = small_params();
    let bytes = params.to_bytes().expect("encode");
    assert_eq!(GroupParameters::from_bytes(&bytes).expect("decode"), params);
}

#[test]
fn test_decoding_revalidates() {
    let raw = params::RawParameters {
        modulus: BigUint::from(1_000_003u32),
        g: BigUint::from(1u32),
        h: BigUint::from(3u32),
        dimensions: *small_params().dimensions(),
    };
    let bytes = bincode::serialize(&raw).expect("encode");
    assert!(matches!(
        GroupParameters::from_bytes(&bytes),
        Err(CoinError::Encoding(_))
    ));

    let truncated = &small_params().to_bytes().expect("encode")[..4];
    assert!(GroupParameters::from_bytes(truncated).is_err());
}

#[test]
fn test_demo_parameters() {
    let params = GroupParameters::demo().expect("demo");
    let dims = params.dimensions();
    assert_eq!(dims.serial_size, DEMO_SERIAL_SIZE);
    assert!(Some(2 * dims.serial_size - 1) <= dims.capacity());
    assert_eq!((2 * dims.serial_size - 2) % dims.columns, 0);
    assert_eq!((2 * dims.serial_size - 2) / dims.columns, dims.rows - 1);
}

#[test]
fn test_public_coin_encoding() {
    let params = small_params();
    let mut rng = StdRng::seed_from_u64(9);
    let public = PrivateCoin::mint(&params, &mut rng).public_coin(&params);
    let bytes = public.to_bytes().expect("encode");
    assert_eq!(PublicCoin::from_bytes(&bytes).expect("decode"), public);
}
