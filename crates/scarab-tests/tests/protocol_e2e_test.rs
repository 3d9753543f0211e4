//! End-to-end protocol tests for the scarab system
//!
//! These walk the full secret lifecycle: LTS ceremony, write deposit,
//! read grant, per-node decrypt authorization, threshold combination, and
//! local recovery. The decrypt cross-check is the property under test:
//! a grant for one write must never unlock another.

use curve25519_dalek::{constants::RISTRETTO_BASEPOINT_POINT, scalar::Scalar};
use rand::rngs::OsRng;

use scarab_core::{
    Arguments, InstanceId, Instruction, InstructionSignature, PolicyId, PublicKey, ReadRecord,
    ScarabError, WriteRecord, ARG_READ, ARG_WRITE, CONTRACT_READ_ID, CONTRACT_WRITE_ID,
};
use scarab_ocs::{LtsPublic, LtsShare, ReencryptShare};
use scarab_service::{
    combine, recover, setup_dealer, DecryptRequest, DecryptService, InMemoryLedger,
    InstanceExtract, LtsSetupRequest, ServiceError,
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("scarab=debug")
        .with_test_writer()
        .try_init();
}

fn ceremony() -> (LtsPublic, Vec<LtsShare>) {
    let req = LtsSetupRequest {
        nodes: vec![
            "127.0.0.1:7771".to_string(),
            "127.0.0.1:7772".to_string(),
            "127.0.0.1:7773".to_string(),
        ],
        threshold: 2,
    };
    let (reply, shares) = setup_dealer(&req, &mut OsRng).unwrap();
    (reply.lts, shares)
}

fn deposit(
    ledger: &mut InMemoryLedger,
    lts: &LtsPublic,
    policy: PolicyId,
    secret: &[u8],
) -> InstanceExtract {
    let record = WriteRecord::seal(lts, policy, secret, &mut OsRng);
    let mut args = Arguments::new();
    args.push(ARG_WRITE, record.encode().unwrap());
    let inst = Instruction::spawn(policy, CONTRACT_WRITE_ID, args, vec![]);
    let ids = ledger.apply(&inst).unwrap();
    ledger.extract(&ids[0]).unwrap()
}

fn grant(
    ledger: &mut InMemoryLedger,
    policy: PolicyId,
    write: &InstanceExtract,
    reader: &Scalar,
) -> InstanceExtract {
    let xc = RISTRETTO_BASEPOINT_POINT * reader;
    let record = ReadRecord::new(write.instance_id, xc);
    let mut args = Arguments::new();
    args.push(ARG_READ, record.encode().unwrap());
    let sig = InstructionSignature {
        signer: PublicKey::from_point(&xc),
        signature: vec![0; 64],
    };
    let inst = Instruction::spawn(policy, CONTRACT_READ_ID, args, vec![sig]);
    let ids = ledger.apply(&inst).unwrap();
    ledger.extract(&ids[0]).unwrap()
}

/// Run the decrypt step against a threshold subset of nodes and finish
/// the decryption as the reader.
fn decrypt(
    nodes: &[DecryptService],
    lts: &LtsPublic,
    read: &InstanceExtract,
    write: &InstanceExtract,
    reader: &Scalar,
) -> Result<Vec<u8>, ScarabError> {
    let req = DecryptRequest {
        read: read.clone(),
        write: write.clone(),
    };
    // Any threshold-sized subset works; take the first and last node.
    let shares: Vec<ReencryptShare> = [&nodes[0], &nodes[2]]
        .iter()
        .map(|n| n.reencrypt(&req))
        .collect::<Result<_, _>>()?;
    let reply = combine(lts, write, &shares, 2)?;
    Ok(recover(&reply, reader))
}

#[test]
fn test_full_secret_lifecycle() {
    init_tracing();

    // ==========================================
    // STEP 1: LTS ceremony, 2-of-3
    // ==========================================
    let (lts, shares) = ceremony();
    let nodes: Vec<DecryptService> = shares
        .into_iter()
        .map(|s| DecryptService::new(lts.clone(), s))
        .collect();

    // ==========================================
    // STEP 2: deposit two secrets under one policy
    // ==========================================
    let mut ledger = InMemoryLedger::standard();
    let policy = PolicyId::new([0x44; 32]);
    let w1 = deposit(&mut ledger, &lts, policy, b"secret key 1");
    let w2 = deposit(&mut ledger, &lts, policy, b"secret key 2");
    assert_ne!(w1.instance_id, w2.instance_id);

    // ==========================================
    // STEP 3: one read grant per write, distinct readers
    // ==========================================
    let reader1 = Scalar::random(&mut OsRng);
    let reader2 = Scalar::random(&mut OsRng);
    let r1 = grant(&mut ledger, policy, &w1, &reader1);
    let r2 = grant(&mut ledger, policy, &w2, &reader2);

    // ==========================================
    // STEP 4: cross-decrypts are refused by every node
    // ==========================================
    assert!(matches!(
        decrypt(&nodes, &lts, &r1, &w2, &reader1),
        Err(ScarabError::Unauthorized)
    ));
    assert!(matches!(
        decrypt(&nodes, &lts, &r2, &w1, &reader2),
        Err(ScarabError::Unauthorized)
    ));

    // ==========================================
    // STEP 5: matched decrypts recover the exact secrets
    // ==========================================
    assert_eq!(
        decrypt(&nodes, &lts, &r1, &w1, &reader1).unwrap(),
        b"secret key 1"
    );
    assert_eq!(
        decrypt(&nodes, &lts, &r2, &w2, &reader2).unwrap(),
        b"secret key 2"
    );

    // The wrong reader scalar yields garbage, not the secret.
    let stolen = decrypt(&nodes, &lts, &r1, &w1, &reader2).unwrap();
    assert_ne!(stolen, b"secret key 1");
}

#[test]
fn test_replayed_instruction_is_refused() {
    init_tracing();
    let (lts, _) = ceremony();
    let mut ledger = InMemoryLedger::standard();
    let policy = PolicyId::new([0x44; 32]);

    let record = WriteRecord::seal(&lts, policy, b"secret key 1", &mut OsRng);
    let mut args = Arguments::new();
    args.push(ARG_WRITE, record.encode().unwrap());
    let inst = Instruction::spawn(policy, CONTRACT_WRITE_ID, args, vec![]);

    ledger.apply(&inst).unwrap();
    assert!(matches!(
        ledger.apply(&inst),
        Err(ServiceError::DuplicateInstance(_))
    ));
}

#[test]
fn test_record_rebound_to_other_policy_is_refused() {
    init_tracing();
    let (lts, _) = ceremony();
    let mut ledger = InMemoryLedger::standard();

    // Seal under one policy, replay the same bytes under another.
    let record = WriteRecord::seal(&lts, PolicyId::new([0x44; 32]), b"secret key 1", &mut OsRng);
    let mut args = Arguments::new();
    args.push(ARG_WRITE, record.encode().unwrap());
    let inst = Instruction::spawn(PolicyId::new([0x55; 32]), CONTRACT_WRITE_ID, args, vec![]);

    assert!(matches!(
        ledger.apply(&inst),
        Err(ServiceError::Contract(ScarabError::ProofInvalid(_)))
    ));
}

#[test]
fn test_grant_for_missing_write_is_refused() {
    init_tracing();
    let mut ledger = InMemoryLedger::standard();
    let policy = PolicyId::new([0x44; 32]);

    let xc = RISTRETTO_BASEPOINT_POINT * Scalar::from(7u64);
    let record = ReadRecord::new(InstanceId::new([0xaa; 32]), xc);
    let mut args = Arguments::new();
    args.push(ARG_READ, record.encode().unwrap());
    let inst = Instruction::spawn(policy, CONTRACT_READ_ID, args, vec![]);

    assert!(matches!(
        ledger.apply(&inst),
        Err(ServiceError::Contract(ScarabError::BadWriteReference(_)))
    ));
}

#[test]
fn test_committed_bytes_are_verbatim() {
    init_tracing();
    let (lts, _) = ceremony();
    let mut ledger = InMemoryLedger::standard();
    let policy = PolicyId::new([0x44; 32]);

    let record = WriteRecord::seal(&lts, policy, b"secret key 1", &mut OsRng);
    let raw = record.encode().unwrap();
    let mut args = Arguments::new();
    args.push(ARG_WRITE, raw.clone());
    let inst = Instruction::spawn(policy, CONTRACT_WRITE_ID, args, vec![]);

    let ids = ledger.apply(&inst).unwrap();
    let extract = ledger.extract(&ids[0]).unwrap();
    assert_eq!(extract.value, raw);
}
