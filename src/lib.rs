//! `hgvsg` is a crate for translating transcript-relative variant changes
//! into genomic HGVS notation.
//!
//! The crate provides two main points of entry:
//!
//! - Parsing genomic expressions (such as `5:g.149439278_149439301delinsGC`)
//!   into [`Variant`]s.
//! - Translating transcript-relative changes (such as `1642_1643GT>AA`
//!   anchored at `X:53239699`) into [`Variant`]s.
//!
//! ## Parsing genomic expressions
//!
//! A [`genomic::Parser`] qualifies an expression with the RefSeq accession of
//! its chromosome for a given [`Assembly`] and parses the edit. The resulting
//! [`Variant`] exposes the VEP-style region (`chrom:start-end/ALT`) and a
//! stable identifier (`chrom:start-end:REF/ALT`).
//!
//! ```
//! use hgvsg::Assembly;
//! use hgvsg::genomic::Parser;
//!
//! let parser = Parser::for_assembly(Assembly::GRCh37);
//! let variant = parser.parse("X:g.129190011_129190010insT")?;
//!
//! assert_eq!(variant.region(), "X:129190011-129190010/T");
//! assert_eq!(variant.identifier(), "X:129190011-129190010:-/T");
//!
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Translating transcript changes
//!
//! Transcript changes are written relative to a transcript that may lie on
//! either strand of the genome. A [`transcript::Translator`] recovers the
//! genomic reading of the alleles by comparing them against reference
//! sequence, which it obtains through the [`reference::Reference`] trait.
//! Local segments ([`reference::Memory`]) are always available; clients for a
//! SeqRepo REST service and the Ensembl REST API are available with the
//! `http` feature.
//!
//! ```
//! use hgvsg::Assembly;
//! use hgvsg::reference::Memory;
//! use hgvsg::transcript::Builder;
//!
//! let reference =
//!     Memory::default().with_segment(Assembly::GRCh37, "17".parse()?, 7577610, "T");
//! let translator = Builder::default().reference(reference)?.try_build()?;
//!
//! let variant = translator
//!     .from_transcript_change("17", 7577610, "673-2A>G", true)
//!     .unwrap();
//! assert_eq!(variant.region(), "17:7577610-7577610/C");
//!
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]
#![warn(rust_2021_compatibility)]
#![warn(missing_debug_implementations)]
#![warn(clippy::missing_docs_in_private_items)]
#![warn(rustdoc::broken_intra_doc_links)]

pub mod allele;
pub mod assembly;
pub mod chromosome;
pub mod genomic;
pub mod reference;
pub mod transcript;
pub mod variant;

pub use assembly::Assembly;
pub use chromosome::Chromosome;
pub use genomic::Parser;
pub use transcript::Translator;
pub use variant::Variant;
