//! Property-based tests for extension registration and snapshot isolation.
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test --test factory_properties
//! ```

use proptest::prelude::*;

use msgpack_factory::{
    Arg, DecodeHandler, EncodeHandler, ExplicitRegistration, ExtTag, ExtensionType, Factory,
    HandlerError, RegistrationError, SimpleRegistration, TypeHandle, TypeKey,
};

#[derive(Debug, Clone, PartialEq)]
struct Alpha(u32);

impl ExtensionType for Alpha {
    fn to_extension_bytes(&self) -> Vec<u8> {
        self.0.to_be_bytes().to_vec()
    }

    fn from_extension_bytes(data: &[u8]) -> Result<Self, HandlerError> {
        let raw: [u8; 4] = data.try_into().map_err(|_| HandlerError::UnexpectedEof {
            expected: 4,
            actual: data.len(),
        })?;
        Ok(Alpha(u32::from_be_bytes(raw)))
    }
}

#[derive(Debug, Clone, PartialEq)]
struct Beta(String);

impl ExtensionType for Beta {
    fn to_extension_bytes(&self) -> Vec<u8> {
        self.0.as_bytes().to_vec()
    }

    fn from_extension_bytes(data: &[u8]) -> Result<Self, HandlerError> {
        String::from_utf8(data.to_vec())
            .map(Beta)
            .map_err(|err| HandlerError::InvalidPayload(err.to_string()))
    }
}

fn seeded_factory() -> Factory {
    let mut factory = Factory::create();
    factory.register::<Beta>(-1).unwrap();
    factory
}

// ============================================================================
// 1. Tag Range
// ============================================================================

fn out_of_range_tag() -> impl Strategy<Value = i64> {
    prop_oneof![i64::MIN..-128i64, 128i64..=i64::MAX]
}

proptest! {
    /// Tags outside [-128, 127] fail and leave both registries unchanged.
    #[test]
    fn out_of_range_tags_rejected(tag in out_of_range_tag()) {
        let mut factory = seeded_factory();
        let encode_before = factory.encode_registry().duplicate();
        let decode_before = factory.decode_registry().duplicate();

        let err = factory.register::<Alpha>(tag).unwrap_err();

        prop_assert_eq!(err, RegistrationError::Range(tag));
        prop_assert_eq!(factory.encode_registry(), &encode_before);
        prop_assert_eq!(factory.decode_registry(), &decode_before);
    }

    /// Every valid tag installs both bindings.
    #[test]
    fn valid_tags_bind_both_directions(tag in -128i64..=127) {
        let mut factory = Factory::create();
        factory.register::<Alpha>(tag).unwrap();

        let ext_tag = ExtTag::try_from(tag).unwrap();
        prop_assert!(factory.decode_registry().lookup(ext_tag).is_some());

        let binding = factory.encode_registry().lookup(&TypeKey::of::<Alpha>());
        prop_assert_eq!(binding.map(|binding| binding.tag), Some(ext_tag));
    }

    /// Values survive an encoder/decoder pair created from the same factory.
    #[test]
    fn round_trip_through_instances(tag in -128i64..=127, value in any::<u32>()) {
        let mut factory = Factory::create();
        factory.register::<Alpha>(tag).unwrap();

        let mut encoder = factory.new_encoder(None);
        encoder.write_ext(&Alpha(value)).unwrap();

        let mut decoder = factory.new_decoder(None);
        decoder.feed(encoder.as_bytes());
        prop_assert_eq!(decoder.read_ext_as::<Alpha>().unwrap(), Alpha(value));
    }
}

// ============================================================================
// 2. Replacement
// ============================================================================

proptest! {
    /// A later registration on the same tag wins the decode binding.
    #[test]
    fn same_tag_last_write_wins(tag in -128i64..=127, text in "[a-z]{4}") {
        let mut factory = Factory::create();
        factory.register::<Alpha>(tag).unwrap();
        factory.register::<Beta>(tag).unwrap();

        let mut decoder = factory.new_decoder(None);
        let mut encoder = factory.new_encoder(None);
        encoder.write_ext(&Beta(text.clone())).unwrap();
        decoder.feed(encoder.as_bytes());

        prop_assert_eq!(decoder.read_ext_as::<Beta>().unwrap(), Beta(text));
    }
}

#[test]
fn test_replaced_type_keeps_encode_binding() {
    let mut factory = Factory::create();
    factory.register::<Alpha>(5).unwrap();
    factory.register::<Beta>(5).unwrap();

    // both types still encode to 5; only the decode side was replaced
    assert!(factory.encode_registry().lookup_type::<Alpha>().is_some());
    assert!(factory.encode_registry().lookup_type::<Beta>().is_some());

    let mut decoder = factory.new_decoder(None);
    decoder.feed(&hex::decode("d6052a2a2a2a").unwrap());
    assert_eq!(decoder.read_ext_as::<Beta>().unwrap(), Beta("****".to_string()));
}

// ============================================================================
// 3. Snapshot Isolation
// ============================================================================

#[test]
fn test_instances_before_and_after_registration_differ() {
    let mut factory = Factory::create();
    let before = factory.new_encoder(None);
    let before_decoder = factory.new_decoder(None);

    factory.register::<Alpha>(9).unwrap();
    let after = factory.new_encoder(None);

    assert!(before.ext_registry().lookup_type::<Alpha>().is_none());
    assert!(before_decoder.ext_registry().is_empty());
    assert!(after.ext_registry().lookup_type::<Alpha>().is_some());
}

#[test]
fn test_instance_mutation_stays_private() {
    let factory = seeded_factory();
    let mut first = factory.new_encoder(None);
    let second = factory.new_encoder(None);

    first.ext_registry_mut().put(
        TypeKey::of::<Alpha>(),
        ExtTag::new(3),
        EncodeHandler::for_type::<Alpha, _>("alpha-le", |a| a.0.to_le_bytes().to_vec()),
    );
    first.ext_registry_mut().remove(&TypeKey::of::<Beta>());

    assert_eq!(first.ext_registry().len(), 1);
    assert!(second.ext_registry().lookup_type::<Alpha>().is_none());
    assert!(second.ext_registry().lookup_type::<Beta>().is_some());
    assert_eq!(second.ext_registry(), factory.encode_registry());
}

// ============================================================================
// 4. Explicit Selectors
// ============================================================================

#[test]
fn test_nil_encode_installs_decode_only() {
    let mut factory = Factory::create();
    let decode = DecodeHandler::for_type("alpha", |data: &[u8]| Alpha::from_extension_bytes(data));

    factory
        .register_type(
            ExplicitRegistration::new(12, TypeHandle::of::<Alpha>()).with_decode(decode.clone()),
        )
        .unwrap();

    assert!(factory.encode_registry().lookup_type::<Alpha>().is_none());
    assert_eq!(
        factory.decode_registry().lookup(ExtTag::new(12)).map(|b| &b.handler),
        Some(&decode)
    );
}

#[test]
fn test_nil_encode_through_args() {
    let mut factory = Factory::create();
    let decode = DecodeHandler::for_type("alpha", |data: &[u8]| Alpha::from_extension_bytes(data));
    let options = Arg::map([("encode", Arg::Nil), ("decode", Arg::from(decode))]);

    factory
        .register_type_args(&[Arg::Int(12), TypeHandle::of::<Alpha>().into(), options])
        .unwrap();

    assert!(factory.encode_registry().lookup_type::<Alpha>().is_none());
    assert!(factory.decode_registry().contains(ExtTag::new(12)));
}

proptest! {
    /// A nil encode selector removes an encode binding installed earlier.
    #[test]
    fn nil_encode_replaces_earlier_registration(first in -128i64..=127, second in -128i64..=127) {
        let mut factory = Factory::create();
        factory.register::<Alpha>(first).unwrap();

        let decode = DecodeHandler::for_type("alpha", |data: &[u8]| Alpha::from_extension_bytes(data));
        let options = Arg::map([("encode", Arg::Nil), ("decode", Arg::from(decode))]);
        factory
            .register_type_args(&[Arg::Int(second), TypeHandle::of::<Alpha>().into(), options])
            .unwrap();

        prop_assert!(factory.encode_registry().lookup_type::<Alpha>().is_none());
        prop_assert!(factory.decode_registry().contains(ExtTag::try_from(second).unwrap()));

        let mut encoder = factory.new_encoder(None);
        prop_assert!(encoder.write_ext(&Alpha(1)).is_err());
    }
}

// ============================================================================
// 5. Scenarios
// ============================================================================

#[test]
fn test_scenario_out_of_range_tag() {
    let mut factory = seeded_factory();
    let before = factory.clone();

    let err = factory
        .register_type(SimpleRegistration::of::<Alpha>(200))
        .unwrap_err();

    assert_eq!(err, RegistrationError::Range(200));
    assert_eq!(err.to_string(), "integer 200 too big to convert to `signed char'");
    assert_eq!(factory.encode_registry(), before.encode_registry());
    assert_eq!(factory.decode_registry(), before.decode_registry());
}

#[test]
fn test_scenario_create_with_extra_argument() {
    let _factory = Factory::create();
    let err = Factory::create_with_args(&[Arg::from("extra")]).unwrap_err();

    assert!(matches!(err, RegistrationError::Arity { given: 1, .. }));
}

#[test]
fn test_scenario_concurrent_instances() {
    let mut factory = Factory::create();
    factory.register::<Alpha>(0).unwrap();

    std::thread::scope(|scope| {
        for n in 0..4u32 {
            let factory = &factory;
            scope.spawn(move || {
                let mut encoder = factory.new_encoder(None);
                encoder.write_ext(&Alpha(n)).unwrap();

                let mut decoder = factory.new_decoder(None);
                decoder.feed(encoder.as_bytes());
                assert_eq!(decoder.read_ext_as::<Alpha>().unwrap(), Alpha(n));
            });
        }
    });
}
