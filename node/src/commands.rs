//! Subcommand implementations.
//!
//! Each command loads its inputs, calls into `quill_protocol`, and writes
//! the wire-encoded result. Progress goes to the log; the one value a
//! caller might want to capture (tx id, identity, summary) goes to stdout.

use anyhow::{anyhow, bail, Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::Path;

use quill_protocol::codec;
use quill_protocol::configtx::{make_anchor_node_update_tx, sanity_check_and_sign};
use quill_protocol::envelope::{decode_payload, read_envelope_from_file};
use quill_protocol::identity::{Ed25519Verifier, LocalIdentity, SerializedIdentity, SigningIdentity};
use quill_protocol::messages::{
    AnchorNode, Envelope, HeaderType, PayloadData, ProposalResponse, SignedProposal,
    SmartContractInvocationSpec,
};
use quill_protocol::proposal::{
    build_signed_proposal, create_proposal_with_transient, verify_signed_proposal, TransientMap,
};
use quill_protocol::transaction::{assemble_transaction, endorse};

use crate::cli::{
    AnchorUpdateArgs, AssembleArgs, EndorseArgs, IdentityArgs, InspectArgs, KeygenArgs,
    ProposeArgs, SignConfigArgs,
};
use crate::keys;

// ---------------------------------------------------------------------------
// File helpers
// ---------------------------------------------------------------------------

fn write_wire<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let bytes = codec::encode(value)?;
    std::fs::write(path, &bytes)
        .with_context(|| format!("failed to write {}", path.display()))?;
    tracing::info!(path = %path.display(), bytes = bytes.len(), "written");
    Ok(())
}

fn read_wire<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let bytes =
        std::fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    codec::decode(&bytes).with_context(|| format!("{} is not a valid message", path.display()))
}

// ---------------------------------------------------------------------------
// Argument parsing
// ---------------------------------------------------------------------------

/// Parses `key=hex` into a transient map entry.
pub fn parse_transient(entry: &str) -> Result<(String, Vec<u8>)> {
    let (key, value) = entry
        .split_once('=')
        .ok_or_else(|| anyhow!("transient entry {:?} is not key=hex", entry))?;
    if key.is_empty() {
        bail!("transient entry {:?} has an empty key", entry);
    }
    let value = hex::decode(value)
        .with_context(|| format!("transient value for {:?} is not hex", key))?;
    Ok((key.to_string(), value))
}

/// Parses `host:port` into an anchor node.
pub fn parse_anchor(entry: &str) -> Result<AnchorNode> {
    let (host, port) = entry
        .rsplit_once(':')
        .ok_or_else(|| anyhow!("anchor {:?} is not host:port", entry))?;
    if host.is_empty() {
        bail!("anchor {:?} has an empty host", entry);
    }
    let port: u16 = port
        .parse()
        .with_context(|| format!("anchor {:?} has an invalid port", entry))?;
    Ok(AnchorNode {
        host: host.to_string(),
        port: i32::from(port),
    })
}

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

pub fn keygen(args: KeygenArgs) -> Result<()> {
    let identity = LocalIdentity::generate(String::new());
    keys::write_key(&args.out, &identity, args.force)?;
    tracing::info!(path = %args.out.display(), "key generated");
    println!("{}", hex::encode(identity.public_key_bytes()));
    Ok(())
}

pub fn identity(args: IdentityArgs) -> Result<()> {
    let identity = keys::load_identity(&args)?;
    println!("{}", hex::encode(identity.serialize_identity()?));
    Ok(())
}

/// Builds, signs and writes a proposal. Returns its tx id.
pub fn propose(args: ProposeArgs) -> Result<String> {
    let signer = keys::load_signer(&args.identity)?;
    let transient = args
        .transient
        .iter()
        .map(|entry| parse_transient(entry))
        .collect::<Result<TransientMap>>()?;
    let spec = SmartContractInvocationSpec::invoke(args.contract.clone(), &args.args);

    let proposal = create_proposal_with_transient(
        HeaderType::EndorserTransaction,
        &args.group,
        &spec,
        &signer.identity().serialize_identity()?,
        (!transient.is_empty()).then_some(&transient),
        signer.nonces(),
    )?;
    let signed = build_signed_proposal(&proposal, signer.identity())?;
    let tx_id = proposal.tx_id()?.unwrap_or_default();

    write_wire(&args.out, &signed)?;
    tracing::info!(tx_id = %tx_id, group_id = %args.group, contract = %args.contract, "proposal signed");
    Ok(tx_id)
}

pub fn endorse_proposal(args: EndorseArgs) -> Result<()> {
    let identity = keys::load_identity(&args.identity)?;
    let signed: SignedProposal = read_wire(&args.proposal)?;
    let proposal = verify_signed_proposal(&signed, &Ed25519Verifier)
        .context("refusing to endorse an unverifiable proposal")?;
    let payload = hex::decode(args.payload_hex.trim()).context("--payload-hex is not hex")?;

    let response = endorse(&identity, &payload)?;
    write_wire(&args.out, &response)?;
    tracing::info!(tx_id = ?proposal.tx_id()?, msp_id = %identity.msp_id(), "proposal endorsed");
    Ok(())
}

pub fn assemble(args: AssembleArgs) -> Result<()> {
    let identity = keys::load_identity(&args.identity)?;
    let signed: SignedProposal = read_wire(&args.proposal)?;
    let proposal = verify_signed_proposal(&signed, &Ed25519Verifier)?;
    let responses = args
        .responses
        .iter()
        .map(|path| read_wire::<ProposalResponse>(path))
        .collect::<Result<Vec<_>>>()?;

    let envelope = assemble_transaction(&proposal, &identity, &responses)?;
    write_wire(&args.out, &envelope)?;
    println!("{}", proposal.tx_id()?.unwrap_or_default());
    Ok(())
}

pub fn sign_config(args: SignConfigArgs) -> Result<()> {
    let signer = keys::load_signer(&args.identity)?;
    let incoming = read_envelope_from_file(&args.envelope)?;
    let signed = sanity_check_and_sign(&incoming, &args.group, &signer)
        .with_context(|| format!("{} was not co-signed", args.envelope.display()))?;
    write_wire(&args.out, &signed)
}

pub fn anchor_update(args: AnchorUpdateArgs) -> Result<()> {
    let signer = keys::load_signer(&args.identity)?;
    let anchors = args
        .anchors
        .iter()
        .map(|a| parse_anchor(a))
        .collect::<Result<Vec<_>>>()?;
    let envelope = make_anchor_node_update_tx(&args.group, &args.org, &anchors, &signer)?;
    write_wire(&args.out, &envelope)?;
    tracing::info!(group_id = %args.group, org = %args.org, anchors = anchors.len(), "anchor update built");
    Ok(())
}

pub fn inspect(args: InspectArgs) -> Result<()> {
    let envelope = read_envelope_from_file(&args.envelope)?;
    let summary = summarize(&envelope)?;
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

// ---------------------------------------------------------------------------
// Inspection
// ---------------------------------------------------------------------------

/// What `inspect` prints.
#[derive(Debug, Serialize)]
pub struct EnvelopeSummary {
    pub header_type: String,
    pub version: i32,
    pub epoch: u64,
    pub group_id: Option<String>,
    pub tx_id: Option<String>,
    pub creator_msp: Option<String>,
    /// `None` when the body does not decode as its declared type.
    pub data_kind: Option<&'static str>,
    pub config_signatures: Option<usize>,
    pub signed: bool,
    pub payload_len: usize,
}

pub fn summarize(envelope: &Envelope) -> Result<EnvelopeSummary> {
    let payload = decode_payload(&envelope.payload)?;
    let group_header = payload.group_header()?;
    let creator_msp = payload
        .signature_header()?
        .creator
        .and_then(|creator| SerializedIdentity::from_bytes(&creator).ok())
        .map(|id| id.msp_id);
    let data = payload.decode_data().ok();

    Ok(EnvelopeSummary {
        header_type: HeaderType::describe(group_header.header_type),
        version: group_header.version,
        epoch: group_header.epoch,
        group_id: group_header.group_id,
        tx_id: group_header.tx_id,
        creator_msp,
        data_kind: data.as_ref().map(PayloadData::kind_name),
        config_signatures: match &data {
            Some(PayloadData::ConfigUpdate(update)) => Some(update.signatures.len()),
            _ => None,
        },
        signed: envelope.is_signed(),
        payload_len: envelope.payload.len(),
    })
}
