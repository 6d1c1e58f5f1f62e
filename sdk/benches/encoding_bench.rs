// Encoding benchmarks for the Flow SDK.
//
// Covers the canonical encoder on a typical payload, the three canonical
// transaction forms, a full sign-and-envelope pass, and JSON-Cadence
// decoding of an event payload.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use flow_sdk::cadence::{self, Number, Value};
use flow_sdk::config::DEFAULT_GAS_LIMIT;
use flow_sdk::crypto::{HashAlgorithm, InMemorySigner};
use flow_sdk::rlp::{self, RlpItem};
use flow_sdk::transaction::{
    add_envelope_signature, add_payload_signature, Argument, ProposalKey, Transaction,
};
use flow_sdk::types::{Address, Identifier};

const TRANSFER: &str = r#"
import FungibleToken from 0xee82856bf20e2aa6
transaction(amount: UFix64, to: Address) {
    prepare(signer: AuthAccount) {}
}
"#;

const DEPOSIT_EVENT: &str = r#"{"type":"Event","value":{"id":"A.0ae53cb6e3f42a79.FlowToken.TokensDeposited","fields":[{"name":"amount","value":{"type":"UFix64","value":"10.00000000"}},{"name":"to","value":{"type":"Optional","value":{"type":"Address","value":"0x01cf0e2f2f715450"}}}]}}"#;

fn transfer(authorizers: usize) -> Transaction {
    let payer = Address::from_hex("f8d6e0586b0a20c7").unwrap_or_default();
    let arguments = vec![
        Argument::from_value(&Value::Number(Number::UFix64(1_000_000_000))).unwrap(),
        Argument::from_value(&Value::Address(payer)).unwrap(),
    ];
    let authorizers = (0..authorizers)
        .map(|i| Address::from_bytes(&[0x10, i as u8]).unwrap())
        .collect();
    Transaction::new(
        TRANSFER,
        arguments,
        Identifier::from_bytes(&[0xab; 32]).unwrap(),
        DEFAULT_GAS_LIMIT,
        ProposalKey::new(payer, 0, 42),
        payer,
        authorizers,
    )
}

fn bench_rlp_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("rlp/encode_list");
    for &n in &[8usize, 64, 512] {
        let item = RlpItem::list((0..n).map(|i| RlpItem::uint(i as u64 * 1_000)).collect());
        group.throughput(Throughput::Elements(n as u64));
        group.bench_with_input(BenchmarkId::from_parameter(n), &item, |b, item| {
            b.iter(|| rlp::encode(item).unwrap());
        });
    }
    group.finish();
}

fn bench_canonical_forms(c: &mut Criterion) {
    let tx = transfer(2);
    c.bench_function("transaction/canonical_payload", |b| {
        b.iter(|| tx.canonical_payload().unwrap());
    });
    c.bench_function("transaction/payment_envelope", |b| {
        b.iter(|| tx.canonical_payment_envelope().unwrap());
    });
    c.bench_function("transaction/id", |b| {
        b.iter(|| tx.id().unwrap());
    });
}

fn bench_signer_list(c: &mut Criterion) {
    let mut group = c.benchmark_group("transaction/signer_list");
    for &n in &[1usize, 8, 32] {
        let tx = transfer(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &tx, |b, tx| {
            b.iter(|| tx.signer_list());
        });
    }
    group.finish();
}

fn bench_sign_transaction(c: &mut Criterion) {
    let key = InMemorySigner::generate(HashAlgorithm::Sha3_256);
    let tx = transfer(1);
    let authorizer = tx.authorizers()[0];
    let payer = tx.payer();

    c.bench_function("secp256k1/sign_transaction", |b| {
        b.iter(|| {
            let partly = add_payload_signature(&tx, authorizer, 0, &key).unwrap();
            add_envelope_signature(&partly, payer, 0, &key).unwrap()
        });
    });
}

fn bench_decode_event(c: &mut Criterion) {
    c.bench_function("cadence/decode_event", |b| {
        b.iter(|| cadence::decode_str(DEPOSIT_EVENT).unwrap());
    });
}

criterion_group!(
    benches,
    bench_rlp_encode,
    bench_canonical_forms,
    bench_signer_list,
    bench_sign_transaction,
    bench_decode_event,
);
criterion_main!(benches);
