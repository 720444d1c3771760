//! Solidity interfaces of the two contracts the flows talk to.
//!
//! Declared once here and shared by every client: the native adapters
//! send the encoded calls through an alloy provider, the browser page
//! through the injected wallet.

use alloy_sol_types::{sol, SolCall};

sol! {
    /// ERC-1155 surface of the serum token.
    interface ISerum {
        function isApprovedForAll(address account, address operator) external view returns (bool);
        function setApprovalForAll(address operator, bool approved) external;
        function balanceOf(address account, uint256 id) external view returns (uint256);
    }

    /// Claimable ERC-721 drop that burns serum to mint mutants.
    interface IMutantCollection {
        function claim(address receiver, uint256 quantity) external;
        function nextTokenIdToMint() external view returns (uint256);
        function ownerOf(uint256 tokenId) external view returns (address);
    }
}

/// Bare method name of a call, used to label errors and logs.
///
/// `claim(address,uint256)` -> `claim`
pub fn method_name<C: SolCall>() -> &'static str {
    let signature: &'static str = C::SIGNATURE;
    signature.split('(').next().unwrap_or(signature)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::{Address, U256};

    #[test]
    fn test_method_name() {
        assert_eq!(method_name::<IMutantCollection::claimCall>(), "claim");
        assert_eq!(method_name::<IMutantCollection::nextTokenIdToMintCall>(), "nextTokenIdToMint");
        assert_eq!(method_name::<ISerum::setApprovalForAllCall>(), "setApprovalForAll");
        assert_eq!(method_name::<ISerum::isApprovedForAllCall>(), "isApprovedForAll");
    }

    #[test]
    fn test_selectors_match_erc_signatures() {
        assert_eq!(ISerum::isApprovedForAllCall::SIGNATURE, "isApprovedForAll(address,address)");
        assert_eq!(ISerum::setApprovalForAllCall::SIGNATURE, "setApprovalForAll(address,bool)");
        assert_eq!(ISerum::balanceOfCall::SIGNATURE, "balanceOf(address,uint256)");
        assert_eq!(IMutantCollection::claimCall::SIGNATURE, "claim(address,uint256)");
        assert_eq!(IMutantCollection::ownerOfCall::SELECTOR, [0x63, 0x52, 0x21, 0x1e]);
    }

    #[test]
    fn test_claim_encoding_layout() {
        let receiver = Address::repeat_byte(0xab);
        let data = IMutantCollection::claimCall {
            receiver,
            quantity: U256::from(2),
        }
        .abi_encode();

        // selector + two 32-byte words
        assert_eq!(data.len(), 4 + 64);
        assert_eq!(&data[16..36], receiver.as_slice());
        assert_eq!(data[67], 2);
    }
}
