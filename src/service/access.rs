use crate::models::{
    contractmodel::{Contract, ContractSummary},
    projectmodel::Project,
    proposalmodel::ProposalDetails,
    reviewmodel::ReviewDetails,
    usermodel::{User, UserRole},
};

use super::error::ServiceError;

/// Every decision here is derived from freshly loaded relational state plus
/// the caller's {id, role}; nothing is taken from cached claims.

pub fn require_project_owner(user: &User, project: &Project) -> Result<(), ServiceError> {
    if project.company_id != user.id {
        return Err(ServiceError::NotProjectOwner(user.id, project.id));
    }
    Ok(())
}

/// Bulk proposal listing on a project: the owning company or an admin.
/// Freelancers are always denied, even the project's own applicants.
pub fn require_proposal_list_access(user: &User, project: &Project) -> Result<(), ServiceError> {
    match user.role {
        UserRole::Admin => Ok(()),
        UserRole::Company => require_project_owner(user, project),
        UserRole::Freelancer => Err(ServiceError::PermissionDenied(
            "Freelancers cannot list the proposals of a project".to_string(),
        )),
    }
}

/// Proposal history of a freelancer: that freelancer or an admin. Companies
/// are denied outright.
pub fn require_proposal_history_access(
    user: &User,
    freelancer_id: i64,
) -> Result<(), ServiceError> {
    match user.role {
        UserRole::Admin => Ok(()),
        UserRole::Freelancer if user.id == freelancer_id => Ok(()),
        UserRole::Freelancer => Err(ServiceError::PermissionDenied(
            "You can only view your own proposals".to_string(),
        )),
        UserRole::Company => Err(ServiceError::PermissionDenied(
            "Companies cannot list proposals by freelancer".to_string(),
        )),
    }
}

/// Single proposal read: the proposal's freelancer, the owning company, or
/// an admin.
pub fn can_view_proposal(user: &User, proposal: &ProposalDetails) -> bool {
    user.role == UserRole::Admin
        || proposal.freelancer_id == user.id
        || proposal.company_id == user.id
}

/// A project participant: the owning company, or a freelancer holding an
/// accepted proposal on the project.
pub fn is_participant(user: &User, project: &Project, has_accepted_proposal: bool) -> bool {
    user.id == project.company_id || has_accepted_proposal
}

pub fn require_participant(
    user: &User,
    project: &Project,
    has_accepted_proposal: bool,
) -> Result<(), ServiceError> {
    if is_participant(user, project, has_accepted_proposal) {
        return Ok(());
    }
    Err(ServiceError::NotParticipant(user.id, project.id))
}

/// Reading a project conversation: participants plus admins.
pub fn require_conversation_access(
    user: &User,
    project: &Project,
    has_accepted_proposal: bool,
) -> Result<(), ServiceError> {
    if user.role == UserRole::Admin {
        return Ok(());
    }
    require_participant(user, project, has_accepted_proposal)
}

pub fn can_view_contract(user: &User, contract: &ContractSummary) -> bool {
    user.role == UserRole::Admin
        || contract.freelancer_id == user.id
        || contract.company_id == user.id
}

/// Contract status changes: the company party or an admin.
pub fn require_contract_status_access(
    user: &User,
    contract: &Contract,
) -> Result<(), ServiceError> {
    if user.role == UserRole::Admin || contract.company_id == user.id {
        return Ok(());
    }
    Err(ServiceError::PermissionDenied(
        "You are not allowed to change the status of this contract".to_string(),
    ))
}

/// Which freelancer must hold an accepted proposal for a review pair to be a
/// confirmed engagement on the project. Either direction is valid: company
/// reviews freelancer, or freelancer reviews company.
pub fn review_engagement_freelancer(
    reviewer: &User,
    reviewee: &User,
    project: &Project,
) -> Result<i64, ServiceError> {
    match (reviewer.role, reviewee.role) {
        (UserRole::Freelancer, UserRole::Company) if project.company_id == reviewee.id => {
            Ok(reviewer.id)
        }
        (UserRole::Company, UserRole::Freelancer) if project.company_id == reviewer.id => {
            Ok(reviewee.id)
        }
        _ => Err(ServiceError::NotParticipant(reviewer.id, project.id)),
    }
}

/// Review history by reviewer/reviewee id: that user or an admin.
pub fn require_review_history_access(user: &User, subject_id: i64) -> Result<(), ServiceError> {
    if user.role == UserRole::Admin || user.id == subject_id {
        return Ok(());
    }
    Err(ServiceError::PermissionDenied(
        "You can only view your own reviews".to_string(),
    ))
}

pub fn can_view_review(user: &User, review: &ReviewDetails) -> bool {
    user.role == UserRole::Admin
        || review.reviewer_id == user.id
        || review.reviewee_id == user.id
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        contractmodel::ContractStatus, projectmodel::ProjectStatus,
        proposalmodel::ProposalStatus,
    };
    use bigdecimal::BigDecimal;
    use chrono::Utc;

    fn user(id: i64, role: UserRole) -> User {
        User {
            id,
            name: format!("user-{}", id),
            email: format!("user{}@example.com", id),
            password: "hash".to_string(),
            role,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn project(id: i64, company_id: i64) -> Project {
        Project {
            id,
            title: "Build website".to_string(),
            description: "A marketing site with a small CMS behind it".to_string(),
            company_id,
            status: ProjectStatus::Open,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn proposal_details(freelancer_id: i64, company_id: i64) -> ProposalDetails {
        ProposalDetails {
            id: 7,
            amount: BigDecimal::from(1500),
            description: "I will build the website within two weeks".to_string(),
            status: ProposalStatus::Pending,
            freelancer_id,
            freelancer_name: "Freya".to_string(),
            freelancer_email: "freya@example.com".to_string(),
            project_id: 1,
            project_title: "Build website".to_string(),
            project_status: ProjectStatus::Open,
            company_id,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn contract(company_id: i64, freelancer_id: i64) -> Contract {
        Contract {
            id: 3,
            terms: "Half upfront, half on delivery".to_string(),
            amount: BigDecimal::from(1500),
            project_id: 1,
            freelancer_id,
            company_id,
            status: ContractStatus::Active,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn only_the_owner_passes_the_project_owner_check() {
        let owner = user(10, UserRole::Company);
        let other = user(11, UserRole::Company);
        let p = project(1, 10);

        assert!(require_project_owner(&owner, &p).is_ok());
        assert!(matches!(
            require_project_owner(&other, &p),
            Err(ServiceError::NotProjectOwner(11, 1))
        ));
    }

    #[test]
    fn proposal_listing_denies_freelancers_and_foreign_companies() {
        let p = project(1, 10);

        assert!(require_proposal_list_access(&user(10, UserRole::Company), &p).is_ok());
        assert!(require_proposal_list_access(&user(99, UserRole::Admin), &p).is_ok());

        // Even an applicant cannot bulk-list a project's proposals.
        assert!(matches!(
            require_proposal_list_access(&user(20, UserRole::Freelancer), &p),
            Err(ServiceError::PermissionDenied(_))
        ));
        assert!(matches!(
            require_proposal_list_access(&user(11, UserRole::Company), &p),
            Err(ServiceError::NotProjectOwner(11, 1))
        ));
    }

    #[test]
    fn proposal_history_is_owner_or_admin_only() {
        assert!(require_proposal_history_access(&user(20, UserRole::Freelancer), 20).is_ok());
        assert!(require_proposal_history_access(&user(1, UserRole::Admin), 20).is_ok());
        assert!(require_proposal_history_access(&user(21, UserRole::Freelancer), 20).is_err());
        // Companies are denied outright, even for their own applicants.
        assert!(require_proposal_history_access(&user(10, UserRole::Company), 20).is_err());
    }

    #[test]
    fn single_proposal_visibility() {
        let details = proposal_details(20, 10);

        assert!(can_view_proposal(&user(20, UserRole::Freelancer), &details));
        assert!(can_view_proposal(&user(10, UserRole::Company), &details));
        assert!(can_view_proposal(&user(1, UserRole::Admin), &details));
        assert!(!can_view_proposal(&user(21, UserRole::Freelancer), &details));
        assert!(!can_view_proposal(&user(11, UserRole::Company), &details));
    }

    #[test]
    fn participants_are_the_owner_and_accepted_freelancers() {
        let p = project(1, 10);
        let owner = user(10, UserRole::Company);
        let accepted = user(20, UserRole::Freelancer);
        let rejected = user(21, UserRole::Freelancer);

        assert!(is_participant(&owner, &p, false));
        assert!(is_participant(&accepted, &p, true));
        assert!(!is_participant(&rejected, &p, false));

        assert!(matches!(
            require_participant(&rejected, &p, false),
            Err(ServiceError::NotParticipant(21, 1))
        ));
    }

    #[test]
    fn conversation_access_adds_admins_to_participants() {
        let p = project(1, 10);

        assert!(require_conversation_access(&user(1, UserRole::Admin), &p, false).is_ok());
        assert!(require_conversation_access(&user(10, UserRole::Company), &p, false).is_ok());
        assert!(require_conversation_access(&user(20, UserRole::Freelancer), &p, true).is_ok());
        assert!(require_conversation_access(&user(20, UserRole::Freelancer), &p, false).is_err());
    }

    #[test]
    fn contract_status_is_company_party_or_admin() {
        let c = contract(10, 20);

        assert!(require_contract_status_access(&user(10, UserRole::Company), &c).is_ok());
        assert!(require_contract_status_access(&user(1, UserRole::Admin), &c).is_ok());
        assert!(require_contract_status_access(&user(20, UserRole::Freelancer), &c).is_err());
        assert!(require_contract_status_access(&user(11, UserRole::Company), &c).is_err());
    }

    #[test]
    fn review_engagement_is_symmetric() {
        let p = project(1, 10);
        let company = user(10, UserRole::Company);
        let freelancer = user(20, UserRole::Freelancer);

        // Company reviews freelancer: the reviewee must hold the proposal.
        assert_eq!(
            review_engagement_freelancer(&company, &freelancer, &p).unwrap(),
            20
        );
        // Freelancer reviews company: the reviewer must hold the proposal.
        assert_eq!(
            review_engagement_freelancer(&freelancer, &company, &p).unwrap(),
            20
        );
    }

    #[test]
    fn review_engagement_rejects_wrong_pairs() {
        let p = project(1, 10);

        // Company that does not own the project.
        assert!(review_engagement_freelancer(
            &user(11, UserRole::Company),
            &user(20, UserRole::Freelancer),
            &p
        )
        .is_err());
        // Freelancer reviewing a company that does not own the project.
        assert!(review_engagement_freelancer(
            &user(20, UserRole::Freelancer),
            &user(11, UserRole::Company),
            &p
        )
        .is_err());
        // Same-role pairs are never an engagement.
        assert!(review_engagement_freelancer(
            &user(20, UserRole::Freelancer),
            &user(21, UserRole::Freelancer),
            &p
        )
        .is_err());
        assert!(review_engagement_freelancer(
            &user(10, UserRole::Company),
            &user(11, UserRole::Company),
            &p
        )
        .is_err());
    }

    #[test]
    fn review_visibility_covers_both_parties_and_admin() {
        let details = ReviewDetails {
            id: 5,
            rating: 4,
            comment: None,
            reviewer_id: 10,
            reviewer_name: "Acme".to_string(),
            reviewer_role: UserRole::Company,
            reviewee_id: 20,
            reviewee_name: "Freya".to_string(),
            reviewee_role: UserRole::Freelancer,
            project_id: 1,
            project_title: "Build website".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        assert!(can_view_review(&user(10, UserRole::Company), &details));
        assert!(can_view_review(&user(20, UserRole::Freelancer), &details));
        assert!(can_view_review(&user(1, UserRole::Admin), &details));
        assert!(!can_view_review(&user(30, UserRole::Freelancer), &details));
    }
}
