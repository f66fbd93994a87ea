use tenure_types::CertificateId;

use crate::StoreError;

/// Per-certificate records, keyed by id.
///
/// Live certificates and disposal tombstones live in separate tables so a
/// redeemed or burned id can still report how it left the ledger.
pub trait CertificateStore {
    fn put_certificate(&self, id: CertificateId, entry: &[u8]) -> Result<(), StoreError>;
    fn get_certificate(&self, id: CertificateId) -> Result<Option<Vec<u8>>, StoreError>;
    fn delete_certificate(&self, id: CertificateId) -> Result<(), StoreError>;
    /// All live certificates in ascending id order.
    fn iter_certificates(&self) -> Result<Vec<(CertificateId, Vec<u8>)>, StoreError>;

    fn put_disposal(&self, id: CertificateId, disposal: &[u8]) -> Result<(), StoreError>;
    fn iter_disposals(&self) -> Result<Vec<(CertificateId, Vec<u8>)>, StoreError>;
}
