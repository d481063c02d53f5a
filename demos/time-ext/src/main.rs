//! Timestamp extension demo
//!
//! Registers [`Timestamp`] on a factory, shows that an encoder created
//! before the registration keeps its empty view, and round-trips values
//! through encoders and decoders created afterwards.
//!
//! Environment variables:
//! - RUST_LOG: tracing filter (default `info`, try `msgpack_factory=trace`)

mod timestamp;

use msgpack_factory::{
    CodecError, DecoderOptions, Error, ExplicitRegistration, ExtTag, ExtensionValue, Factory,
    TypeHandle,
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::timestamp::Timestamp;

const TIMESTAMP_TAG: i64 = 0;
const SECONDS_TAG: i64 = 1;

fn main() {
    init_tracing();

    if let Err(err) = run() {
        warn!(error = %err, "demo failed");
        std::process::exit(1);
    }
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
}

fn run() -> Result<(), Error> {
    let mut factory = Factory::create();
    let mut early = factory.new_encoder(None);

    factory.register::<Timestamp>(TIMESTAMP_TAG)?;

    match early.write_ext(&Timestamp::new(0, 0)) {
        Err(CodecError::UnregisteredType(name)) => {
            info!(type_name = name, "encoder created before registration ignores it")
        }
        other => warn!(result = ?other.map(|_| ()), "early encoder saw a later registration"),
    }

    let values = [
        Timestamp::new(1_700_000_000, 0),
        Timestamp::new(1_700_000_000, 123_456_789),
        Timestamp::new(-1, 500),
    ];

    let mut encoder = factory.new_encoder(None);
    for value in &values {
        encoder.write_ext(value)?;
    }
    info!(bytes = %hex::encode(encoder.as_bytes()), "encoded timestamps");

    let mut decoder = factory.new_decoder(None);
    decoder.feed(&encoder.take_bytes());
    for expected in &values {
        let decoded: Timestamp = decoder.read_ext_as()?;
        info!(
            secs = decoded.secs,
            nanos = decoded.nanos,
            matches = decoded == *expected,
            "decoded timestamp"
        );
    }

    // seconds-only frames written by another producer; decode-only, so
    // this factory never writes Timestamp values itself
    let mut legacy = Factory::create();
    legacy.register_type(
        ExplicitRegistration::new(SECONDS_TAG, TypeHandle::of::<Timestamp>())
            .with_decode_method("from_seconds_bytes"),
    )?;

    let frame = ExtensionValue::new(
        ExtTag::try_from(SECONDS_TAG)?,
        Timestamp::new(86_400, 0).to_seconds_bytes(),
    );
    encoder.write_extension(&frame)?;

    let mut legacy_decoder = legacy.new_decoder(None);
    legacy_decoder.feed(encoder.as_bytes());
    let decoded: Timestamp = legacy_decoder.read_ext_as()?;
    info!(secs = decoded.secs, "decoded seconds-only timestamp");

    if let Err(err) = legacy.new_encoder(None).write_ext(&decoded) {
        info!(error = %err, "decode-only registration has no encoder");
    }

    let mut strict = factory.new_decoder(None);
    strict.ext_registry_mut().clear();
    strict.feed(&hex::decode("d60000000001").unwrap_or_default());
    match strict.read_ext() {
        Err(err) => info!(error = %err, "cleared decoder rejects the tag"),
        Ok(_) => warn!("cleared decoder still decoded the tag"),
    }

    let options = DecoderOptions::default().with_allow_unknown_ext(true);
    let mut lenient = factory.new_decoder(Some(options));
    lenient.feed(&hex::decode("d47f2a").unwrap_or_default());
    let unknown: ExtensionValue = lenient.read_ext_as()?;
    info!(
        tag = %unknown.tag,
        payload = %hex::encode(&unknown.payload),
        "passed through unknown extension"
    );

    Ok(())
}
