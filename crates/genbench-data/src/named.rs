// Named benchmark constructors
//
// Each function fixes the dataset identifier and returns a builder for the
// requested split; everything else (cache root, version, force_download,
// use_cloud_cache) is set on the builder.
//
//   let train = demo_human_or_worm(Split::Train).build()?;
//   let test = human_enhancers_cohn(Split::Test).version(0).build()?;

use genbench_core::Result;

use crate::genomic::{GenomicClfDataset, GenomicClfDatasetBuilder, Split};

/// Builder for any dataset by name, with the split given as a string.
///
/// Fails with `Error::InvalidSplit` before anything touches the filesystem.
pub fn get_dataset(name: &str, split: &str) -> Result<GenomicClfDatasetBuilder> {
    let split: Split = split.parse()?;
    Ok(GenomicClfDataset::builder(name, split))
}

pub fn demo_coding_vs_intergenomic_seqs(split: Split) -> GenomicClfDatasetBuilder {
    GenomicClfDataset::builder("demo_coding_vs_intergenomic_seqs", split)
}

pub fn demo_human_or_worm(split: Split) -> GenomicClfDatasetBuilder {
    GenomicClfDataset::builder("demo_human_or_worm", split)
}

/// Not in the cloud cache; only usable when already cached locally.
pub fn drosophila_enhancers_stark(split: Split) -> GenomicClfDatasetBuilder {
    GenomicClfDataset::builder("drosophila_enhancers_stark", split)
}

pub fn dummy_mouse_enhancers_ensembl(split: Split) -> GenomicClfDatasetBuilder {
    GenomicClfDataset::builder("dummy_mouse_enhancers_ensembl", split)
}

pub fn human_enhancers_cohn(split: Split) -> GenomicClfDatasetBuilder {
    GenomicClfDataset::builder("human_enhancers_cohn", split)
}

pub fn human_enhancers_ensembl(split: Split) -> GenomicClfDatasetBuilder {
    GenomicClfDataset::builder("human_enhancers_ensembl", split)
}

pub fn human_ensembl_regulatory(split: Split) -> GenomicClfDatasetBuilder {
    GenomicClfDataset::builder("human_ensembl_regulatory", split)
}

pub fn human_nontata_promoters(split: Split) -> GenomicClfDatasetBuilder {
    GenomicClfDataset::builder("human_nontata_promoters", split)
}

/// Not in the cloud cache; only usable when already cached locally.
pub fn human_ocr_ensembl(split: Split) -> GenomicClfDatasetBuilder {
    GenomicClfDataset::builder("human_ocr_ensembl", split)
}
